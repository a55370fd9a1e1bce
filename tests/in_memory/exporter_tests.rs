//! In-memory integration tests for attribute access and operations.

use super::helpers::{SAMPLE_NAME, TestExporter, export_sample, exporter};
use eyre::{Result, ensure};
use manageable::export::{domain::ManagementError, services::ObjectExporterError};
use manageable::reflect::domain::{InvocationError, Value, ValueType};
use rstest::rstest;
use std::error::Error as _;

fn management_error(result: Result<Value, ObjectExporterError>) -> ManagementError {
    match result {
        Err(ObjectExporterError::Management(err)) => err,
        other => panic!("expected a management error, got {other:?}"),
    }
}

#[rstest]
#[case("Boolean", Value::Boolean(true))]
#[case("BoxedBoolean", Value::Boolean(false))]
#[case("BoxedBoolean", Value::Null)]
#[case("Byte", Value::Byte(i8::MIN))]
#[case("Byte", Value::Byte(i8::MAX))]
#[case("BoxedByte", Value::Null)]
#[case("Short", Value::Short(i16::MIN))]
#[case("Short", Value::Short(i16::MAX))]
#[case("BoxedShort", Value::Short(-1))]
#[case("Int", Value::Int(i32::MIN))]
#[case("Int", Value::Int(i32::MAX))]
#[case("BoxedInt", Value::Null)]
#[case("Long", Value::Long(i64::MIN))]
#[case("Long", Value::Long(i64::MAX))]
#[case("BoxedLong", Value::Long(0))]
#[case("Float", Value::Float(f32::MIN))]
#[case("Float", Value::Float(f32::MAX))]
#[case("Float", Value::Float(f32::NAN))]
#[case("Float", Value::Float(f32::NEG_INFINITY))]
#[case("BoxedFloat", Value::Null)]
#[case("Double", Value::Double(f64::MIN_POSITIVE))]
#[case("Double", Value::Double(f64::MAX))]
#[case("Double", Value::Double(f64::NAN))]
#[case("BoxedDouble", Value::Double(f64::INFINITY))]
#[case("String", Value::String(String::new()))]
#[case("String", Value::String("héllo".to_owned()))]
#[case("String", Value::Null)]
#[case("Object", Value::Int(42))]
#[case("Object", Value::String("anything".to_owned()))]
#[case("Object", Value::Null)]
fn attribute_round_trips(
    exporter: TestExporter,
    #[case] attribute: &str,
    #[case] value: Value,
) -> Result<()> {
    let _sample = export_sample(&exporter, 0)?;
    exporter.set_attribute(SAMPLE_NAME, attribute, value.clone())?;
    let read = exporter.get_attribute(SAMPLE_NAME, attribute)?;
    ensure!(read == value, "{attribute}: wrote {value}, read {read}");
    Ok(())
}

#[rstest]
#[case("Boolean", Value::Null)]
#[case("Int", Value::Null)]
#[case("Int", Value::Long(1))]
#[case("Long", Value::Int(1))]
#[case("Double", Value::Float(1.0))]
#[case("BoxedInt", Value::String("1".to_owned()))]
fn unassignable_values_are_rejected(
    exporter: TestExporter,
    #[case] attribute: &str,
    #[case] value: Value,
) -> Result<()> {
    let _sample = export_sample(&exporter, 0)?;
    let before = exporter.get_attribute(SAMPLE_NAME, attribute)?;
    let result = exporter.set_attribute(SAMPLE_NAME, attribute, value.clone());
    ensure!(
        matches!(
            result,
            Err(ObjectExporterError::Management(ManagementError::InvalidValue { .. }))
        ),
        "{attribute} should reject {value}"
    );
    ensure!(exporter.get_attribute(SAMPLE_NAME, attribute)? == before);
    Ok(())
}

#[rstest]
fn primitive_defaults_are_zero(exporter: TestExporter) -> Result<()> {
    let _sample = export_sample(&exporter, 0)?;
    ensure!(exporter.get_attribute(SAMPLE_NAME, "Int")? == Value::Int(0));
    ensure!(exporter.get_attribute(SAMPLE_NAME, "BoxedInt")? == Value::Null);
    ensure!(exporter.get_attribute(SAMPLE_NAME, "Boolean")? == Value::Boolean(false));
    Ok(())
}

#[rstest]
fn unmarked_accessors_are_invisible(exporter: TestExporter) -> Result<()> {
    let sample = export_sample(&exporter, 0)?;
    let err = management_error(exporter.get_attribute(SAMPLE_NAME, "NotManaged"));
    ensure!(matches!(err, ManagementError::AttributeNotFound(_)));
    let result = exporter.set_attribute(SAMPLE_NAME, "NotManaged", Value::Int(1));
    ensure!(matches!(
        result,
        Err(ObjectExporterError::Management(ManagementError::AttributeNotFound(_)))
    ));
    ensure!(sample.state().not_managed == 0);

    let result = exporter.invoke_operation(SAMPLE_NAME, "getNotManaged", &[]);
    ensure!(matches!(
        management_error(result),
        ManagementError::OperationNotFound { .. }
    ));
    Ok(())
}

#[rstest]
fn write_only_attribute_cannot_be_read(exporter: TestExporter) -> Result<()> {
    let sample = export_sample(&exporter, 0)?;
    exporter.set_attribute(SAMPLE_NAME, "WriteOnly", Value::Int(12))?;
    ensure!(sample.state().write_only == 12);
    let err = management_error(exporter.get_attribute(SAMPLE_NAME, "WriteOnly"));
    ensure!(matches!(err, ManagementError::AttributeNotFound(name) if name == "WriteOnly"));
    Ok(())
}

#[rstest]
fn read_only_attribute_keeps_its_value(exporter: TestExporter) -> Result<()> {
    let _sample = export_sample(&exporter, 23)?;
    let result = exporter.set_attribute(SAMPLE_NAME, "ReadOnly", Value::Int(1));
    ensure!(matches!(
        result,
        Err(ObjectExporterError::Management(ManagementError::AttributeNotFound(_)))
    ));
    ensure!(exporter.get_attribute(SAMPLE_NAME, "ReadOnly")? == Value::Int(23));
    Ok(())
}

#[rstest]
fn attribute_listing_describes_every_shape(exporter: TestExporter) -> Result<()> {
    let _sample = export_sample(&exporter, 0)?;
    let attributes = exporter.list_attributes(SAMPLE_NAME)?;
    ensure!(attributes.len() == 18, "got {} attributes", attributes.len());

    let find = |name: &str| attributes.iter().find(|info| info.name == name);
    let boolean = find("Boolean").ok_or_else(|| eyre::eyre!("Boolean missing"))?;
    ensure!(boolean.is_is && boolean.value_type == ValueType::BOOLEAN);
    let boxed = find("BoxedInt").ok_or_else(|| eyre::eyre!("BoxedInt missing"))?;
    ensure!(boxed.value_type == ValueType::INT.nullable());
    let read_only = find("ReadOnly").ok_or_else(|| eyre::eyre!("ReadOnly missing"))?;
    ensure!(read_only.readable && !read_only.writable);
    let write_only = find("WriteOnly").ok_or_else(|| eyre::eyre!("WriteOnly missing"))?;
    ensure!(!write_only.readable && write_only.writable);
    ensure!(find("NotManaged").is_none());
    Ok(())
}

#[rstest]
#[case(Value::Null)]
#[case(Value::Boolean(true))]
#[case(Value::Long(i64::MIN))]
#[case(Value::Double(f64::NAN))]
#[case(Value::String("ping".to_owned()))]
fn echo_returns_its_argument(exporter: TestExporter, #[case] arg: Value) -> Result<()> {
    let sample = export_sample(&exporter, 0)?;
    let result = exporter.invoke_operation(SAMPLE_NAME, "echo", &[arg.clone()])?;
    ensure!(result == arg);
    ensure!(sample.invocations() == 1);
    Ok(())
}

#[rstest]
fn operation_listing_includes_descriptions(exporter: TestExporter) -> Result<()> {
    let _sample = export_sample(&exporter, 0)?;
    let operations = exporter.list_operations(SAMPLE_NAME)?;
    let names: Vec<&str> = operations.iter().map(|info| info.name.as_str()).collect();
    ensure!(names == ["echo", "fail"], "got {names:?}");
    ensure!(operations[0].description.as_deref() == Some("Returns its argument"));
    Ok(())
}

#[rstest]
fn underlying_failure_is_wrapped_and_recoverable(exporter: TestExporter) -> Result<()> {
    let sample = export_sample(&exporter, 0)?;
    let err = management_error(exporter.invoke_operation(SAMPLE_NAME, "fail", &[]));

    let ManagementError::Invocation { member, source } = &err else {
        panic!("expected an invocation error, got {err:?}");
    };
    ensure!(member == "fail");
    ensure!(matches!(source, InvocationError::Failed(_)));
    let root = source
        .source()
        .ok_or_else(|| eyre::eyre!("failure has no root cause"))?;
    ensure!(root.to_string() == "sample failure");

    let echoed = exporter.invoke_operation(SAMPLE_NAME, "echo", &[Value::Int(1)])?;
    ensure!(echoed == Value::Int(1));
    ensure!(sample.invocations() == 2);
    Ok(())
}

#[rstest]
fn wrong_arity_is_not_found(exporter: TestExporter) -> Result<()> {
    let _sample = export_sample(&exporter, 0)?;
    let err = management_error(exporter.invoke_operation(SAMPLE_NAME, "echo", &[]));
    ensure!(matches!(
        err,
        ManagementError::OperationNotFound { arguments: 0, .. }
    ));
    Ok(())
}

#[rstest]
fn dropped_object_is_released(exporter: TestExporter) -> Result<()> {
    let sample = export_sample(&exporter, 0)?;
    drop(sample);

    let err = management_error(exporter.get_attribute(SAMPLE_NAME, "Int"));
    ensure!(matches!(err, ManagementError::ObjectReleased(_)));

    let summaries = exporter.list_exports()?;
    ensure!(summaries.len() == 1 && !summaries[0].alive);

    exporter.unexport(SAMPLE_NAME)?;
    ensure!(exporter.list_exports()?.is_empty());
    Ok(())
}
