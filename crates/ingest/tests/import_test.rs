/// Integration tests for loading order tables from CSV and Parquet files.

use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use uuid::Uuid;

use shoplens_core::config::OrderFormat;
use shoplens_ingest::OrderImporter;

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a unique temp directory for each test.
fn test_data_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shoplens-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const HEADER: &str = "order_id,customer_id,order_status,order_purchase_timestamp,customer_city,product_category_name,price,freight_value";

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_import_reads_required_columns() {
    let dir = test_data_dir();
    let csv = format!(
        "{}\n\
         o1,c1,delivered,2017-10-02 10:56:33,sao paulo,housewares,29.99,8.72\n\
         o1,c1,delivered,2017-10-02 10:56:33,sao paulo,housewares,10.01,8.72\n\
         o2,c2,delivered,2018-07-24 20:41:37,\"barreiras, ba\",,118.70,22.76\n",
        HEADER
    );
    let path = write_file(&dir, "orders.csv", &csv);

    let orders = OrderImporter::import(&path, OrderFormat::Auto, 8192).unwrap();

    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0].order_id, "o1");
    assert_eq!(orders[0].customer_city, "sao paulo");
    assert_eq!(orders[0].order_purchase_timestamp, "2017-10-02 10:56:33");
    assert_eq!(orders[1].price, Some(10.01));
    assert_eq!(orders[2].customer_city, "barreiras, ba");
    assert_eq!(orders[2].product_category_name, "");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_csv_small_batches_keep_row_order() {
    let dir = test_data_dir();
    let mut csv = String::from(HEADER);
    for i in 0..25 {
        csv.push_str(&format!(
            "\no{},c{},delivered,2018-01-{:02} 08:00:00,rio,toys,{}.5,1.0",
            i,
            i % 4,
            1 + i % 28,
            i
        ));
    }
    let path = write_file(&dir, "orders.csv", &csv);

    let orders = OrderImporter::import(&path, OrderFormat::Csv, 4).unwrap();

    assert_eq!(orders.len(), 25);
    assert_eq!(orders[24].order_id, "o24");
    assert_eq!(orders[24].price, Some(24.5));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_csv_missing_column_is_validation_error() {
    let dir = test_data_dir();
    let path = write_file(
        &dir,
        "orders.csv",
        "order_id,customer_id,order_purchase_timestamp,customer_city,price\no1,c1,2018-01-01,rio,1.0\n",
    );

    let err = OrderImporter::import(&path, OrderFormat::Csv, 1024).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("product_category_name"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_csv_bad_price_is_parse_error() {
    let dir = test_data_dir();
    let csv = format!(
        "{}\no1,c1,delivered,2018-01-01 00:00:00,rio,toys,12.0,1.0\no2,c2,delivered,2018-01-02 00:00:00,rio,toys,twelve,1.0\n",
        HEADER
    );
    let path = write_file(&dir, "orders.csv", &csv);

    let err = OrderImporter::import(&path, OrderFormat::Csv, 1024).unwrap_err();
    assert!(err.is_parse());
    let msg = err.to_string();
    assert!(msg.contains("price"));
    assert!(msg.contains("row 2"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_csv_missing_price_loads_as_none() {
    let dir = test_data_dir();
    let csv = format!(
        "{}\n\
         o1,c1,delivered,2018-01-01 10:00:00,rio,toys,12.0,1.0\n\
         o2,c2,canceled,2018-01-02 10:00:00,sao paulo,,,\n\
         o3,c3,delivered,2018-01-03 10:00:00,natal,toys,NaN,1.0\n",
        HEADER
    );
    let path = write_file(&dir, "orders.csv", &csv);

    let orders = OrderImporter::import(&path, OrderFormat::Csv, 1024).unwrap();

    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0].price, Some(12.0));
    assert_eq!(orders[1].price, None);
    assert_eq!(orders[1].customer_city, "sao paulo");
    assert_eq!(orders[1].order_purchase_timestamp, "2018-01-02 10:00:00");
    assert_eq!(orders[2].price, None);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_header_only_csv_is_empty() {
    let dir = test_data_dir();
    let path = write_file(&dir, "orders.csv", &format!("{}\n", HEADER));

    let orders = OrderImporter::import(&path, OrderFormat::Csv, 1024).unwrap();
    assert!(orders.is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_file_is_io_error() {
    let path = test_data_dir().join("nope.csv");
    let err = OrderImporter::import(&path, OrderFormat::Csv, 1024).unwrap_err();
    assert!(err.to_string().starts_with("IO error"));
}

// ============================================================================
// Parquet
// ============================================================================

#[test]
fn test_parquet_typed_columns_are_accepted() {
    let dir = test_data_dir();
    let path = dir.join("orders.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("customer_id", DataType::Utf8, false),
        Field::new("customer_city", DataType::Utf8, true),
        Field::new("product_category_name", DataType::Utf8, true),
        Field::new("order_id", DataType::Utf8, false),
        Field::new(
            "order_purchase_timestamp",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            false,
        ),
        Field::new("price", DataType::Float64, true),
    ]));
    // 2018-01-03T10:00:00 and 2018-01-05T12:30:00 UTC.
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["c1", "c2"])),
        Arc::new(StringArray::from(vec![Some("rio"), None])),
        Arc::new(StringArray::from(vec![Some("toys"), Some("garden_tools")])),
        Arc::new(StringArray::from(vec!["o1", "o2"])),
        Arc::new(TimestampMillisecondArray::from(vec![1_514_973_600_000, 1_515_155_400_000])),
        Arc::new(Float64Array::from(vec![19.5, 240.0])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let orders = OrderImporter::import(&path, OrderFormat::Auto, 1024).unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].customer_city, "rio");
    assert_eq!(orders[1].customer_city, "");
    assert_eq!(orders[1].price, Some(240.0));
    let ts = shoplens_core::parse_timestamp(&orders[0].order_purchase_timestamp).unwrap();
    assert_eq!(ts.to_string(), "2018-01-03 10:00:00");

    std::fs::remove_dir_all(&dir).ok();
}
