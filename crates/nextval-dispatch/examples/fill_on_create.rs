use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing_subscriber::EnvFilter;

use nextval_core::{
    Callbacks, CreateStatement, EntitySchema, Error, Field, Plugin, TagSettings, Target, Value,
};
use nextval_dispatch::{DispatchEngine, GenerateError};

#[derive(Debug, Default)]
struct Invoice {
    id: u64,
    code: String,
    amount: i64,
}

struct InvoiceField {
    name: &'static str,
    tags: TagSettings,
    get: fn(&Invoice) -> Value,
    set: fn(&mut Invoice, Value) -> Result<(), Error>,
}

impl Field for InvoiceField {
    fn name(&self) -> &str {
        self.name
    }

    fn tags(&self) -> &TagSettings {
        &self.tags
    }

    fn has_default_value(&self) -> bool {
        false
    }

    fn value_of(&self, entity: &dyn Any) -> (Value, bool) {
        let invoice = match entity.downcast_ref::<Invoice>() {
            Some(invoice) => invoice,
            None => return (Value::Null, true),
        };
        let value = (self.get)(invoice);
        let zero = value.is_zero();
        (value, zero)
    }

    fn set(&self, entity: &mut dyn Any, value: Value) -> Result<(), Error> {
        let invoice = entity
            .downcast_mut::<Invoice>()
            .ok_or_else(|| Error::NotAnInstance("invoices".to_string()))?;
        (self.set)(invoice, value)
    }
}

struct InvoiceSchema {
    fields: Vec<Arc<dyn Field>>,
}

impl EntitySchema for InvoiceSchema {
    fn name(&self) -> &str {
        "invoices"
    }

    fn fields(&self) -> &[Arc<dyn Field>] {
        &self.fields
    }

    fn prioritized_primary_field(&self) -> Option<&Arc<dyn Field>> {
        self.fields.first()
    }

    fn is_instance(&self, entity: &dyn Any) -> bool {
        entity.downcast_ref::<Invoice>().is_some()
    }
}

fn invoice_schema() -> Arc<dyn EntitySchema> {
    let fields: Vec<Arc<dyn Field>> = vec![
        Arc::new(InvoiceField {
            name: "id",
            tags: TagSettings::parse("primaryKey;next:sequence;column:id"),
            get: |invoice| Value::Uint(invoice.id),
            set: |invoice, value| {
                invoice.id = value.as_u64().ok_or_else(|| Error::SetField {
                    field: "id".to_string(),
                    reason: "expected unsigned integer".to_string(),
                })?;
                Ok(())
            },
        }),
        Arc::new(InvoiceField {
            name: "code",
            tags: TagSettings::parse("column:code;next:invoice_code"),
            get: |invoice| Value::Text(invoice.code.clone()),
            set: |invoice, value| match value {
                Value::Text(text) => {
                    invoice.code = text;
                    Ok(())
                }
                _ => Err(Error::SetField {
                    field: "code".to_string(),
                    reason: "expected text".to_string(),
                }),
            },
        }),
        Arc::new(InvoiceField {
            name: "amount",
            tags: TagSettings::parse("column:amount"),
            get: |invoice| Value::Int(invoice.amount),
            set: |invoice, value| {
                invoice.amount = value.as_i64().ok_or_else(|| Error::SetField {
                    field: "amount".to_string(),
                    reason: "expected integer".to_string(),
                })?;
                Ok(())
            },
        }),
    ];
    Arc::new(InvoiceSchema { fields })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut engine = DispatchEngine::new();
    let id_seq = Arc::new(AtomicU64::new(0));
    {
        let id_seq = Arc::clone(&id_seq);
        engine.register("sequence", move |_, zero| {
            if !zero {
                return Err(GenerateError::Skip);
            }
            Ok(Value::Uint(id_seq.fetch_add(1, Ordering::SeqCst) + 1))
        });
    }
    let code_seq = Arc::new(AtomicU64::new(0));
    {
        let code_seq = Arc::clone(&code_seq);
        engine.register("invoice_code", move |_, zero| {
            if !zero {
                return Err(GenerateError::Skip);
            }
            let seq = code_seq.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Value::Text(format!("INV-2022-{seq:04}")))
        });
    }

    let engine = Arc::new(engine);
    let mut callbacks = Callbacks::new();
    engine.initialize(&mut callbacks)?;

    let mut invoices: Vec<Invoice> = (1..=3)
        .map(|i| Invoice {
            amount: i * 100,
            ..Invoice::default()
        })
        .collect();

    let schema = invoice_schema();
    let elements: Vec<&mut dyn Any> = invoices
        .iter_mut()
        .map(|invoice| invoice as &mut dyn Any)
        .collect();
    let mut stmt = CreateStatement::new(Some(schema), Target::Collection(elements));
    callbacks.run_create(&mut stmt);

    for err in stmt.take_errors() {
        eprintln!("dispatch error: {err}");
    }
    drop(stmt);

    for invoice in &invoices {
        println!("id={} code={} amount={}", invoice.id, invoice.code, invoice.amount);
    }
    Ok(())
}
