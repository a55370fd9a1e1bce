//! In-memory integration tests for bridge and synthetic methods that carry
//! markers alongside the methods they duplicate.

use super::helpers::{TestExporter, exporter};
use eyre::{Result, ensure};
use manageable::reflect::domain::{ClassInfo, MethodInfo, Value, ValueType};
use once_cell::sync::Lazy;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Default)]
struct Meter {
    value: AtomicI64,
    bridged_writes: AtomicI64,
}

static METER: Lazy<Arc<ClassInfo>> = Lazy::new(|| {
    ClassInfo::class::<Meter>("Meter")
        .method(MethodInfo::getter("getValue", |m: &Meter| m.value.load(Ordering::SeqCst)).managed())
        // Covariant-return copy of getValue.
        .method(
            MethodInfo::getter("getValue", |m: &Meter| Value::Long(m.value.load(Ordering::SeqCst)))
                .managed()
                .bridge(),
        )
        .method(
            MethodInfo::setter("setValue", |m: &Meter, v: i64| {
                m.value.store(v, Ordering::SeqCst);
            })
            .managed(),
        )
        // Erased-parameter copy of setValue.
        .method(
            MethodInfo::setter("setValue", |m: &Meter, v: Value| {
                m.bridged_writes.fetch_add(1, Ordering::SeqCst);
                if let Value::Long(v) = v {
                    m.value.store(v, Ordering::SeqCst);
                }
            })
            .managed()
            .bridge(),
        )
        .method(
            MethodInfo::operation::<Meter, _>("lambda$0", [], ValueType::VOID, |_m, _args| {
                Ok(Value::Null)
            })
            .managed()
            .synthetic(),
        )
        .build()
        .expect("valid class")
});

const NAME: &str = "test:type=Meter";

fn export_meter(exporter: &TestExporter) -> Result<Arc<Meter>> {
    let meter = Arc::new(Meter::default());
    exporter.export(NAME, &METER, &meter)?;
    Ok(meter)
}

#[rstest]
fn bridges_collapse_into_one_attribute(exporter: TestExporter) -> Result<()> {
    let _meter = export_meter(&exporter)?;
    let attributes = exporter.list_attributes(NAME)?;
    ensure!(attributes.len() == 1, "got {attributes:?}");
    let value = &attributes[0];
    ensure!(value.name == "Value");
    ensure!(value.value_type == ValueType::LONG, "declared {}", value.value_type);
    ensure!(value.readable && value.writable);

    let summary = exporter
        .list_exports()?
        .into_iter()
        .find(|summary| summary.name.as_str() == NAME)
        .ok_or_else(|| eyre::eyre!("{NAME} not listed"))?;
    ensure!(summary.rejected == 0, "no declaration conflicts");
    Ok(())
}

#[rstest]
fn generated_methods_are_not_operations(exporter: TestExporter) -> Result<()> {
    let _meter = export_meter(&exporter)?;
    let operations = exporter.list_operations(NAME)?;
    ensure!(operations.is_empty(), "got {operations:?}");
    Ok(())
}

#[rstest]
fn requests_use_the_authored_accessors(exporter: TestExporter) -> Result<()> {
    let meter = export_meter(&exporter)?;
    exporter.set_attribute(NAME, "Value", Value::Long(12))?;
    ensure!(exporter.get_attribute(NAME, "Value")? == Value::Long(12));
    ensure!(meter.bridged_writes.load(Ordering::SeqCst) == 0);
    Ok(())
}
