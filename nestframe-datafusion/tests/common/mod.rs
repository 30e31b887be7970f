//! Shared fixtures: small record batches with nested struct columns.
#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray, StructArray};
use arrow::datatypes::{DataType, Field, Fields, Schema};
use datafusion::prelude::{DataFrame, SessionContext};

fn string_col(values: Vec<&str>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

fn int_col(values: Vec<i64>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

fn float_col(values: Vec<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}

fn struct_col(fields: Fields, arrays: Vec<ArrayRef>) -> ArrayRef {
    Arc::new(StructArray::new(fields, arrays, None))
}

/// Customers with an email nested two levels deep: `name`,
/// `profile.contact.email`.
pub fn customers_frame(ctx: &SessionContext) -> DataFrame {
    let email = string_col(vec![
        "alice@example.com",
        "bob@example.com",
        "carol@example.com",
    ]);
    let contact_fields = Fields::from(vec![Field::new("email", DataType::Utf8, true)]);
    let contact = struct_col(contact_fields.clone(), vec![email]);
    let profile_fields = Fields::from(vec![Field::new(
        "contact",
        DataType::Struct(contact_fields),
        true,
    )]);
    let profile = struct_col(profile_fields.clone(), vec![contact]);
    let name = string_col(vec!["Alice", "Bob", "Carol"]);

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, true),
        Field::new("profile", DataType::Struct(profile_fields), true),
    ]));
    let batch = RecordBatch::try_new(schema, vec![name, profile]).expect("customers batch");
    ctx.read_batch(batch).expect("customers frame")
}

/// Flat orders table: `order_id`, `customer_email`, `amount`. Two orders for
/// alice, one for bob, one for an email no customer has.
pub fn orders_frame(ctx: &SessionContext) -> DataFrame {
    let schema = Arc::new(Schema::new(vec![
        Field::new("order_id", DataType::Int64, false),
        Field::new("customer_email", DataType::Utf8, true),
        Field::new("amount", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            int_col(vec![1, 2, 3, 4]),
            string_col(vec![
                "alice@example.com",
                "bob@example.com",
                "alice@example.com",
                "dave@example.com",
            ]),
            float_col(vec![120.0, 80.5, 42.0, 10.0]),
        ],
    )
    .expect("orders batch");
    ctx.read_batch(batch).expect("orders frame")
}

/// Flat payments table keyed by `order_ref`, for three-way join chains.
pub fn payments_frame(ctx: &SessionContext) -> DataFrame {
    let schema = Arc::new(Schema::new(vec![
        Field::new("payment_id", DataType::Int64, false),
        Field::new("order_ref", DataType::Int64, false),
        Field::new("method", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            int_col(vec![10, 11, 12]),
            int_col(vec![1, 2, 3]),
            string_col(vec!["card", "cash", "card"]),
        ],
    )
    .expect("payments batch");
    ctx.read_batch(batch).expect("payments frame")
}

/// The original three-column shape: `id`, `person{name, age, city}`,
/// `contact{email, phone}` — six leaves in all.
pub fn people_frame(ctx: &SessionContext) -> DataFrame {
    let person_fields = Fields::from(vec![
        Field::new("name", DataType::Utf8, true),
        Field::new("age", DataType::Int64, true),
        Field::new("city", DataType::Utf8, true),
    ]);
    let person = struct_col(
        person_fields.clone(),
        vec![
            string_col(vec!["Ada", "Grace"]),
            int_col(vec![36, 45]),
            string_col(vec!["London", "New York"]),
        ],
    );
    let contact_fields = Fields::from(vec![
        Field::new("email", DataType::Utf8, true),
        Field::new("phone", DataType::Utf8, true),
    ]);
    let contact = struct_col(
        contact_fields.clone(),
        vec![
            string_col(vec!["ada@example.com", "grace@example.com"]),
            string_col(vec!["555-0100", "555-0101"]),
        ],
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("person", DataType::Struct(person_fields), true),
        Field::new("contact", DataType::Struct(contact_fields), true),
    ]));
    let batch = RecordBatch::try_new(schema, vec![int_col(vec![1, 2]), person, contact])
        .expect("people batch");
    ctx.read_batch(batch).expect("people frame")
}

/// A table with no nested columns at all.
pub fn flat_frame(ctx: &SessionContext) -> DataFrame {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("label", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![int_col(vec![1, 2, 3]), string_col(vec!["x", "y", "z"])],
    )
    .expect("flat batch");
    ctx.read_batch(batch).expect("flat frame")
}

/// A leaf column `a_b` next to a struct `a.b`: both flatten to `a_b`.
pub fn colliding_frame(ctx: &SessionContext) -> DataFrame {
    let inner_fields = Fields::from(vec![Field::new("b", DataType::Utf8, true)]);
    let inner = struct_col(inner_fields.clone(), vec![string_col(vec!["nested"])]);

    let schema = Arc::new(Schema::new(vec![
        Field::new("a_b", DataType::Int64, false),
        Field::new("a", DataType::Struct(inner_fields), true),
    ]));
    let batch = RecordBatch::try_new(schema, vec![int_col(vec![7]), inner])
        .expect("colliding batch");
    ctx.read_batch(batch).expect("colliding frame")
}

/// Four levels of nesting: `company.department.team.lead`.
pub fn deep_frame(ctx: &SessionContext) -> DataFrame {
    let team_fields = Fields::from(vec![Field::new("lead", DataType::Utf8, true)]);
    let team = struct_col(team_fields.clone(), vec![string_col(vec!["Lin"])]);
    let department_fields = Fields::from(vec![Field::new(
        "team",
        DataType::Struct(team_fields),
        true,
    )]);
    let department = struct_col(department_fields.clone(), vec![team]);
    let company_fields = Fields::from(vec![Field::new(
        "department",
        DataType::Struct(department_fields),
        true,
    )]);
    let company = struct_col(company_fields.clone(), vec![department]);

    let schema = Arc::new(Schema::new(vec![Field::new(
        "company",
        DataType::Struct(company_fields),
        true,
    )]));
    let batch = RecordBatch::try_new(schema, vec![company]).expect("deep batch");
    ctx.read_batch(batch).expect("deep frame")
}

/// Total row count across collected batches.
pub fn row_count(batches: &[RecordBatch]) -> usize {
    batches.iter().map(|b| b.num_rows()).sum()
}

/// Column names of the first collected batch.
pub fn column_names(batches: &[RecordBatch]) -> Vec<String> {
    batches
        .first()
        .map(|b| {
            b.schema()
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect()
        })
        .unwrap_or_default()
}
