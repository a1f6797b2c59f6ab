use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::compute::cast;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use shoplens_core::config::OrderFormat;
use shoplens_core::{
    OrderRecord, ShoplensError, COL_CUSTOMER_CITY, COL_CUSTOMER_ID, COL_ORDER_ID, COL_PRICE,
    COL_PRODUCT_CATEGORY, COL_PURCHASE_TIMESTAMP, REQUIRED_COLUMNS,
};
use tracing::{debug, info};

const STEP: &str = "order import";

fn arrow_err(e: arrow::error::ArrowError) -> ShoplensError {
    ShoplensError::Arrow(e.to_string())
}

fn parquet_err(e: parquet::errors::ParquetError) -> ShoplensError {
    ShoplensError::Parquet(e.to_string())
}

/// Loads the flat order table from CSV or Parquet.
pub struct OrderImporter;

impl OrderImporter {
    /// Read every row of `path` into [`OrderRecord`]s.
    ///
    /// Only the six required columns are read; any others are ignored.
    pub fn import(
        path: &Path,
        format: OrderFormat,
        batch_size: usize,
    ) -> Result<Vec<OrderRecord>, ShoplensError> {
        let format = resolve_format(path, format);
        debug!(path = %path.display(), %format, "importing orders");

        let orders = match format {
            OrderFormat::Parquet => Self::import_parquet(path, batch_size)?,
            OrderFormat::Csv | OrderFormat::Auto => Self::import_csv(path, batch_size)?,
        };

        info!("Imported {} orders from {}", orders.len(), path.display());
        Ok(orders)
    }

    fn import_csv(path: &Path, batch_size: usize) -> Result<Vec<OrderRecord>, ShoplensError> {
        // Header only: every column is read as text and parsed per field.
        let header = File::open(path)?;
        let (inferred, _) = Format::default()
            .with_header(true)
            .infer_schema(header, Some(1))
            .map_err(arrow_err)?;

        let fields: Vec<Field> = inferred
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        check_columns(&schema)?;

        let reader = ReaderBuilder::new(schema)
            .with_header(true)
            .with_batch_size(batch_size.max(1))
            .build(File::open(path)?)
            .map_err(arrow_err)?;

        let mut orders = Vec::new();
        for batch_result in reader {
            let batch = batch_result.map_err(arrow_err)?;
            append_batch(&batch, &mut orders)?;
        }
        Ok(orders)
    }

    fn import_parquet(path: &Path, batch_size: usize) -> Result<Vec<OrderRecord>, ShoplensError> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;
        check_columns(builder.schema())?;

        let reader = builder
            .with_batch_size(batch_size.max(1))
            .build()
            .map_err(parquet_err)?;

        let mut orders = Vec::new();
        for batch_result in reader {
            let batch = batch_result.map_err(arrow_err)?;
            append_batch(&batch, &mut orders)?;
        }
        Ok(orders)
    }
}

/// Pick a concrete format; `Auto` goes by file extension.
pub fn resolve_format(path: &Path, format: OrderFormat) -> OrderFormat {
    match format {
        OrderFormat::Auto => match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("parquet") | Some("pq") => OrderFormat::Parquet,
            _ => OrderFormat::Csv,
        },
        explicit => explicit,
    }
}

fn check_columns(schema: &Schema) -> Result<(), ShoplensError> {
    for name in REQUIRED_COLUMNS {
        if schema.index_of(name).is_err() {
            return Err(ShoplensError::validation(
                STEP,
                format!("missing required column '{}'", name),
            ));
        }
    }
    Ok(())
}

/// Fetch a column by name and cast it to text.
fn text_column(batch: &RecordBatch, name: &str) -> Result<StringArray, ShoplensError> {
    let column = batch.column_by_name(name).ok_or_else(|| {
        ShoplensError::validation(STEP, format!("missing required column '{}'", name))
    })?;
    let text = cast(column.as_ref(), &DataType::Utf8).map_err(arrow_err)?;
    text.as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| ShoplensError::Arrow(format!("column '{}' did not cast to text", name)))
}

/// Source spellings of a missing value.
fn is_missing(val: &str) -> bool {
    val.is_empty() || val == "None" || val == "null" || val == "NaN" || val == "nan"
}

fn text_at(arr: &StringArray, row: usize) -> &str {
    if arr.is_null(row) {
        return "";
    }
    let val = arr.value(row).trim();
    if is_missing(val) { "" } else { val }
}

/// Missing prices are `None`; present text that is not a finite number fails.
fn parse_price(raw: &str, row_number: usize) -> Result<Option<f64>, ShoplensError> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(ShoplensError::parse(
            COL_PRICE,
            raw,
            format!("row {}: not a number", row_number),
        )),
    }
}

fn append_batch(batch: &RecordBatch, orders: &mut Vec<OrderRecord>) -> Result<(), ShoplensError> {
    let customer_id = text_column(batch, COL_CUSTOMER_ID)?;
    let customer_city = text_column(batch, COL_CUSTOMER_CITY)?;
    let category = text_column(batch, COL_PRODUCT_CATEGORY)?;
    let order_id = text_column(batch, COL_ORDER_ID)?;
    let purchased_at = text_column(batch, COL_PURCHASE_TIMESTAMP)?;
    let price = text_column(batch, COL_PRICE)?;

    let offset = orders.len();
    orders.reserve(batch.num_rows());

    for row in 0..batch.num_rows() {
        // 1-based data row, header excluded.
        let row_number = offset + row + 1;
        orders.push(OrderRecord {
            customer_id: text_at(&customer_id, row).to_string(),
            customer_city: text_at(&customer_city, row).to_string(),
            product_category_name: text_at(&category, row).to_string(),
            order_id: text_at(&order_id, row).to_string(),
            order_purchase_timestamp: text_at(&purchased_at, row).to_string(),
            price: parse_price(text_at(&price, row), row_number)?,
        });
    }
    Ok(())
}
