//! End-to-end pipeline tests over generated source fixtures.
//!
//! Exercises the full read -> clean -> write path: fixture dumps in a temp
//! data directory, the file-backed reader, the six routines, and both the
//! in-memory and parquet warehouse writers.

use anyhow::Result;
use polars::prelude::*;
use retail_etl::io::{FileStore, MemoryWriter, ParquetWarehouse, SourceReader};
use retail_etl::{EtlConfig, Pipeline, SourceId};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// Write a card dump with 500 rows, 25 of which have unparseable expiry
/// dates, and no duplicate card numbers.
fn write_card_fixture(dir: &Path) -> Result<()> {
    let mut csv = String::from("card_number,expiry_date,card_provider,date_payment_confirmed\n");
    for i in 0..500u32 {
        let expiry = if i % 20 == 0 {
            "NULL".to_string()
        } else {
            format!("{:02}/{:02}", (i % 12) + 1, 23 + (i % 5))
        };
        writeln!(
            csv,
            "4929-{:012},{},VISA 16 digit,2022-0{}-15",
            i,
            expiry,
            (i % 9) + 1
        )?;
    }
    std::fs::write(dir.join("card_details.csv"), csv)?;
    Ok(())
}

fn write_user_fixture(dir: &Path) -> Result<()> {
    let mut csv = String::from(
        "index,first_name,last_name,company,email_address,address,phone_number,user_uuid,\
         country,country_code,date_of_birth,join_date\n",
    );
    // ordinary rows
    csv.push_str("0,Ana,Ash,Acme,a@x.com,1 Road,111,u-1,United Kingdom,GB,1970-01-05,2015-03-01\n");
    csv.push_str("1,Ben,Burr,Acme,b@x.com,2 Road,222,u-2,Germany,DE,1988-11-23,2019-07-14\n");
    // corrupt date of birth: whole row is junk
    csv.push_str("2,XCV9,PLQ2,ZZZZ,junk,junk,junk,u-3,junk,XX,NOT-A-DATE,ALSO-NOT\n");
    // join date precedes date of birth, everything else valid
    csv.push_str("3,Dev,Dean,Bolt,d@x.com,4 Road,444,u-4,Germany,DE,2000-06-01,1999-01-01\n");
    // duplicate uuid
    csv.push_str("4,Ana,Ash,Acme,a@x.com,1 Road,111,u-1,United Kingdom,GB,1970-01-05,2015-03-01\n");
    std::fs::write(dir.join("legacy_users.csv"), csv)?;
    Ok(())
}

fn write_store_fixture(dir: &Path) -> Result<()> {
    let mut csv = String::from(
        "index,address,longitude,lat,locality,store_code,staff_numbers,opening_date,\
         store_type,latitude,country_code,continent\n",
    );
    csv.push_str(
        "0,Flat 72W Reindeer Walk,-0.1257,,High Wycombe,HI-9B97EE4E,34,2001-05-04,Local,51.62907,GB,Europe\n",
    );
    csv.push_str("1,NULL,NULL,,NULL,NULL,NULL,NULL,NULL,NULL,NULL,NULL\n");
    csv.push_str("2,4 Heather Dale,N/A,,Rotherham,RO-6EE1B5B5,J78,2013-07-12,Super Store,N/A,GB,eeEurope\n");
    csv.push_str("3,9 Larch Lane,13.4,,Landshut,LA-0772C7B9,92,1995-02-15,Local,48.5294,DE,Europe\n");
    std::fs::write(dir.join("store_details.csv"), csv)?;
    Ok(())
}

fn write_product_fixture(dir: &Path) -> Result<()> {
    let mut csv = String::from(
        "product_name,product_price,weight,category,EAN,date_added,uuid,removed,product_code\n",
    );
    csv.push_str("Tiramisu,£4.50,6 x 100g,food-and-drink,7425710935115,2018-10-22,p-1,Still_avaliable,R7-3126933h\n");
    csv.push_str("Dog Toy,£12.00,1.5kg,pets,1945816931519,2017-03-09,p-2,Still_avaliable,C3-1112211a\n");
    csv.push_str("Candles,£9.99,assorted,homeware,7425710935999,2019-12-30,p-3,Still_avaliable,W4-5554443d\n");
    // row with a missing field
    csv.push_str(",£3.00,200g,toys-and-games,2025815082226,2020-02-01,p-4,Removed,T0-0022222b\n");
    std::fs::write(dir.join("products.csv"), csv)?;
    Ok(())
}

fn write_order_fixture(dir: &Path) -> Result<()> {
    let mut csv = String::from(
        "index,1,first_name,last_name,date_uuid,user_uuid,card_number,store_code,product_code,product_quantity\n",
    );
    csv.push_str("0,NULL,Ana,Ash,d-1,u-1,4929000000000000,HI-9B97EE4E,R7-3126933h,3\n");
    csv.push_str("1,NULL,Ben,Burr,d-2,u-2,4929000000000001,RO-6EE1B5B5,C3-1112211a,1\n");
    csv.push_str("2,NULL,Dev,Dean,d-3,u-4,4929000000000002,LA-0772C7B9,W4-5554443d,2\n");
    std::fs::write(dir.join("orders.csv"), csv)?;
    Ok(())
}

fn write_time_fixture(dir: &Path) -> Result<()> {
    let json = serde_json::json!([
        { "timestamp": "22:00:10", "month": "7", "year": "1994", "day": "8",
          "time_period": "Evening", "date_uuid": "t-1" },
        { "timestamp": "09:15:59", "month": "12", "year": "2008", "day": "30",
          "time_period": "Morning", "date_uuid": "t-2" },
        { "timestamp": "NULL", "month": "QMAVR5H3LD", "year": "NULL", "day": "NULL",
          "time_period": "NULL", "date_uuid": "t-3" },
        { "timestamp": "13:45:00", "month": "1", "year": "2021", "day": "16",
          "time_period": "Midday", "date_uuid": "t-4" }
    ]);
    std::fs::write(dir.join("date_details.json"), json.to_string())?;
    Ok(())
}

fn write_all_fixtures(dir: &Path) -> Result<()> {
    write_user_fixture(dir)?;
    write_card_fixture(dir)?;
    write_store_fixture(dir)?;
    write_product_fixture(dir)?;
    write_order_fixture(dir)?;
    write_time_fixture(dir)?;
    Ok(())
}

#[tokio::test]
async fn card_cleaning_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_card_fixture(dir.path())?;

    let reader = Arc::new(FileStore::new(dir.path()));
    let writer = Arc::new(MemoryWriter::new());
    let pipeline = Pipeline::new(
        reader,
        writer.clone(),
        EtlConfig::default().with_data_dir(dir.path()),
    );

    let summary = pipeline.run_source(SourceId::CardDetails).await?;

    // 25 unparseable expiry dates among 500 rows, no duplicates
    assert_eq!(summary.report.rows_in, 500);
    assert_eq!(summary.rows_loaded(), 475);

    let loaded = writer.table("dim_card_details").unwrap();
    assert_eq!(loaded.height(), 475);

    let numbers = loaded.column("card_number")?.as_materialized_series().clone();
    for number in numbers.str()?.into_no_null_iter() {
        assert!(
            number.chars().all(|c| c.is_ascii_digit()),
            "non-digit card number survived: {number}"
        );
    }
    let expiry = loaded.column("expiry_date")?.as_materialized_series().clone();
    assert_eq!(expiry.null_count(), 0);
    Ok(())
}

#[tokio::test]
async fn full_run_loads_all_six_tables() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_fixtures(dir.path())?;

    let reader = Arc::new(FileStore::new(dir.path()));
    let writer = Arc::new(MemoryWriter::new());
    let pipeline = Pipeline::new(
        reader,
        writer.clone(),
        EtlConfig::default().with_data_dir(dir.path()).with_workers(3),
    );

    let sources = SourceId::all();
    let results = pipeline.run(&sources, None).await;
    assert_eq!(results.len(), 6);
    for (source, result) in &results {
        assert!(result.is_ok(), "{source} failed: {result:?}");
    }

    // routines only remove or flag, never fabricate rows
    for (source, result) in &results {
        let summary = result.as_ref().unwrap();
        assert!(summary.report.rows_out <= summary.report.rows_in, "{source}");
    }

    // orders never drops rows
    let orders = writer.table("orders_table").unwrap();
    assert_eq!(orders.height(), 3);

    // users: bad DOB and duplicate dropped, suspect join date flagged
    let users = writer.table("dim_users").unwrap();
    assert_eq!(users.height(), 3);
    let flags = users
        .column("invalid_date_flag")?
        .as_materialized_series()
        .bool()?
        .clone();
    assert_eq!(flags.sum(), Some(1));

    // stores: all-NULL row dropped, typo'd staff number retained
    let stores = writer.table("dim_store_details").unwrap();
    assert_eq!(stores.height(), 3);
    assert!(stores.column("lat").is_err());

    // products: missing-field row dropped, weights in kilograms
    let products = writer.table("dim_products").unwrap();
    assert_eq!(products.height(), 3);
    assert_eq!(products.column("weight")?.dtype(), &DataType::Float64);

    // time details: corrupt timestamp dropped
    let times = writer.table("dim_date_times").unwrap();
    assert_eq!(times.height(), 3);
    Ok(())
}

#[tokio::test]
async fn parquet_warehouse_round_trip() -> Result<()> {
    let data_dir = tempfile::tempdir()?;
    let warehouse_dir = tempfile::tempdir()?;
    write_order_fixture(data_dir.path())?;

    let reader = Arc::new(FileStore::new(data_dir.path()));
    let warehouse = ParquetWarehouse::new(warehouse_dir.path());
    let pipeline = Pipeline::new(
        reader,
        Arc::new(warehouse.clone()),
        EtlConfig::default().with_data_dir(data_dir.path()),
    );

    let summary = pipeline.run_source(SourceId::Orders).await?;
    assert_eq!(summary.rows_loaded(), 3);

    let file = std::fs::File::open(warehouse.table_path("orders_table"))?;
    let loaded = ParquetReader::new(file).finish()?;
    assert_eq!(loaded.height(), 3);
    assert!(loaded.column("first_name").is_err());
    Ok(())
}

#[tokio::test]
async fn reader_distinguishes_missing_from_malformed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path());

    let missing = store.read(SourceId::Products).await.unwrap_err();
    assert!(matches!(
        missing,
        retail_etl::EtlError::SourceUnavailable { .. }
    ));

    std::fs::write(dir.path().join("date_details.json"), "{not json")?;
    let malformed = store.read(SourceId::DateDetails).await.unwrap_err();
    assert!(matches!(
        malformed,
        retail_etl::EtlError::SourceFormat { .. }
    ));
    Ok(())
}
