//! Tests for the six cleaning routines.
//!
//! Raw fixtures are built the way the file-backed reader delivers them:
//! every column as text, typing left entirely to the routines.


use polars::prelude::*;

/// A raw user frame with one invalid date of birth, one join date preceding
/// the date of birth, and one duplicated uuid.
pub fn raw_users() -> DataFrame {
    df!(
        "index" => ["0", "1", "2", "3", "4"],
        "first_name" => ["Ana", "Ben", "Cat", "Dev", "Ana"],
        "last_name" => ["Ash", "Burr", "Cole", "Dean", "Ash"],
        "company" => ["Acme", "Acme", "Bolt", "Bolt", "Acme"],
        "email_address" => ["a@x.com", "b@x.com", "c@x.com", "d@x.com", "a@x.com"],
        "address" => ["1 Road", "2 Road", "3 Road", "4 Road", "1 Road"],
        "phone_number" => ["111", "222", "333", "444", "111"],
        "user_uuid" => ["u-1", "u-2", "u-3", "u-4", "u-1"],
        "country" => ["United Kingdom", "United Kingdom", "Germany", "Germany", "United Kingdom"],
        "country_code" => ["GB", "GB", "DE", "DE", "GB"],
        "date_of_birth" => ["1970-01-05", "NOT-A-DATE", "1988-11-23", "2000-06-01", "1970-01-05"],
        "join_date" => ["2015-03-01", "2016-01-01", "2019-07-14", "1999-01-01", "2015-03-01"],
    )
    .unwrap()
}

/// A raw card frame with one unparseable expiry date, a formatted card
/// number, and one duplicate.
pub fn raw_cards() -> DataFrame {
    df!(
        "card_number" => ["4111-2222/3333", "30060773296197", "349624180933183", "30060773296197"],
        "expiry_date" => ["09/26", "10/23", "NULL", "10/23"],
        "card_provider" => ["VISA 16 digit", "Diners Club / Carte Blanche", "American Express", "Diners Club / Carte Blanche"],
        "date_payment_confirmed" => ["2015-11-25", "2001-06-18", "garbage", "2001-06-18"],
    )
    .unwrap()
}

/// A raw store frame with a junk `lat` column, one all-NULL row, one row of
/// wholly corrupt values, coordinate sentinels, and a staff-number typo.
pub fn raw_stores() -> DataFrame {
    df!(
        "index" => ["0", "1", "2", "3", "4"],
        "address" => ["Flat 72W, Reindeer Walk", "NULL", "XQ2BDBSP1D", "4 Heather Dale", "9 Larch Lane"],
        "longitude" => ["-0.1257", "NULL", "B4F4O0YBCZ", "N/A", "13.4"],
        "lat" => [None::<&str>, None, Some("VKA5I"), None, None],
        "locality" => ["High Wycombe", "NULL", "9D4LB5C4Y2", "Rotherham", "Landshut"],
        "store_code" => ["HI-9B97EE4E", "NULL", "Y8J0Z2W1T0", "RO-6EE1B5B5", "LA-0772C7B9"],
        "staff_numbers" => ["34", "NULL", "ZCXWWKF", "J78", "92"],
        "opening_date" => ["2001-05-04", "NULL", "GM6CA0O3NE", "2013-07-12", "1995-02-15"],
        "store_type" => ["Local", "NULL", "2R8NTIBTY9", "Super Store", "Local"],
        "latitude" => ["51.62907", "NULL", "FPB6BNTW0B", "N/A", "48.5294"],
        "country_code" => ["GB", "NULL", "ZX0Q1NQ0M2", "GB", "DE"],
        "continent" => ["Europe", "NULL", "XTULNTS0WC", "eeEurope", "Europe"],
    )
    .unwrap()
}

/// A raw product frame with one row missing a field, one invalid date, a
/// duplicate uuid, and the full spread of weight expressions.
pub fn raw_products() -> DataFrame {
    df!(
        "product_name" => [Some("Tiramisu"), Some("Dog Toy"), None, Some("Hand Soap"), Some("Candles"), Some("Tiramisu")],
        "product_price" => [Some("£4.50"), Some("£12.00"), Some("£3.00"), Some("£1.20"), Some("£9.99"), Some("£4.50")],
        "weight" => [Some("6 x 100g"), Some("1.5kg"), Some("200g"), Some("16oz"), Some("assorted"), Some("6 x 100g")],
        "category" => [Some("food-and-drink"), Some("pets"), Some("toys-and-games"), Some("health-and-beauty"), Some("homeware"), Some("food-and-drink")],
        "EAN" => [Some("7425710935115"), Some("1945816931519"), Some("2025815082226"), Some("9185509484378"), Some("7425710935999"), Some("7425710935115")],
        "date_added" => [Some("2018-10-22"), Some("2017-03-09"), Some("2020-02-01"), Some("bogus"), Some("2019-12-30"), Some("2018-10-22")],
        "uuid" => [Some("p-1"), Some("p-2"), Some("p-3"), Some("p-4"), Some("p-5"), Some("p-1")],
        "removed" => [Some("Still_avaliable"), Some("Still_avaliable"), Some("Removed"), Some("Still_avaliable"), Some("Still_avaliable"), Some("Still_avaliable")],
        "product_code" => [Some("R7-3126933h"), Some("C3-1112211a"), Some("T0-0022222b"), Some("H9-8887776c"), Some("W4-5554443d"), Some("R7-3126933h")],
    )
    .unwrap()
}

/// A raw orders frame carrying the junk `"1"` column and the foreign name
/// columns that get pruned.
pub fn raw_orders() -> DataFrame {
    df!(
        "index" => ["0", "1", "2"],
        "1" => ["NULL", "NULL", "NULL"],
        "first_name" => ["Ana", "Ben", "Cat"],
        "last_name" => ["Ash", "Burr", "Cole"],
        "date_uuid" => ["d-1", "d-2", "d-3"],
        "user_uuid" => ["u-1", "u-2", "u-3"],
        "card_number" => ["411122223333", "30060773296197", "349624180933183"],
        "store_code" => ["HI-9B97EE4E", "RO-6EE1B5B5", "LA-0772C7B9"],
        "product_code" => ["R7-3126933h", "C3-1112211a", "T0-0022222b"],
        "product_quantity" => ["3", "1", "2"],
    )
    .unwrap()
}

/// A raw time-detail frame with one unparseable timestamp and a duplicate
/// date_uuid.
pub fn raw_time_details() -> DataFrame {
    df!(
        "timestamp" => ["22:00:10", "09:15:59", "NULL", "13:45:00", "09:15:59"],
        "month" => ["7", "12", "QMAVR5H3LD", "1", "12"],
        "year" => ["1994", "2008", "NULL", "2021", "2008"],
        "day" => ["8", "30", "NULL", "16", "30"],
        "time_period" => ["Evening", "Morning", "NULL", "Midday", "Morning"],
        "date_uuid" => ["t-1", "t-2", "t-3", "t-4", "t-2"],
    )
    .unwrap()
}
