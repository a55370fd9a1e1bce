//! In-memory integration tests for concurrent requests and exports.

use super::helpers::{SAMPLE_CLASS, SAMPLE_NAME, Sample, TestExporter, export_sample, exporter};
use eyre::{Result, ensure, eyre};
use manageable::export::ports::ManagedObjectRepositoryError;
use manageable::export::services::ObjectExporterError;
use manageable::reflect::domain::Value;
use rstest::rstest;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const ROUNDS: usize = 50;

fn join_all<T>(handles: Vec<thread::JoinHandle<T>>) -> Result<Vec<T>> {
    handles
        .into_iter()
        .map(|handle| handle.join().map_err(|_| eyre!("worker thread panicked")))
        .collect()
}

#[rstest]
fn concurrent_operations_all_run(exporter: TestExporter) -> Result<()> {
    let sample = export_sample(&exporter, 0)?;
    let handles = (0..THREADS)
        .map(|worker| {
            let exporter = exporter.clone();
            thread::spawn(move || -> Result<()> {
                for round in 0..ROUNDS {
                    let arg = Value::String(format!("{worker}-{round}"));
                    let echoed = exporter.invoke_operation(SAMPLE_NAME, "echo", &[arg.clone()])?;
                    ensure!(echoed == arg);
                }
                Ok(())
            })
        })
        .collect();

    for outcome in join_all(handles)? {
        outcome?;
    }
    let expected = i64::try_from(THREADS * ROUNDS)?;
    ensure!(sample.invocations() == expected);
    Ok(())
}

#[rstest]
fn concurrent_writes_leave_a_written_value(exporter: TestExporter) -> Result<()> {
    let _sample = export_sample(&exporter, 0)?;
    let handles = (0..THREADS)
        .map(|worker| {
            let exporter = exporter.clone();
            thread::spawn(move || -> Result<()> {
                let value = i64::try_from(worker)?;
                exporter.set_attribute(SAMPLE_NAME, "Long", Value::Long(value))?;
                exporter.get_attribute(SAMPLE_NAME, "Long")?;
                Ok(())
            })
        })
        .collect();

    for outcome in join_all(handles)? {
        outcome?;
    }
    let Value::Long(last) = exporter.get_attribute(SAMPLE_NAME, "Long")? else {
        return Err(eyre!("Long attribute returned a non-long value"));
    };
    ensure!((0..i64::try_from(THREADS)?).contains(&last));
    Ok(())
}

#[rstest]
fn racing_exports_of_one_name_admit_exactly_one(exporter: TestExporter) -> Result<()> {
    let barrier = Arc::new(Barrier::new(THREADS));
    let samples: Vec<Arc<Sample>> = (0..THREADS).map(|_| Arc::new(Sample::default())).collect();
    let handles = samples
        .iter()
        .map(|sample| {
            let exporter = exporter.clone();
            let barrier = Arc::clone(&barrier);
            let sample = Arc::clone(sample);
            thread::spawn(move || {
                barrier.wait();
                exporter
                    .export(SAMPLE_NAME, &SAMPLE_CLASS, &sample)
                    .map(drop)
            })
        })
        .collect();

    let outcomes = join_all(handles)?;
    let admitted = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    ensure!(admitted == 1, "{admitted} exports admitted");
    ensure!(outcomes.iter().filter_map(|o| o.as_ref().err()).all(|err| matches!(
        err,
        ObjectExporterError::Repository(ManagedObjectRepositoryError::DuplicateName(_))
    )));
    ensure!(exporter.list_exports()?.len() == 1);
    Ok(())
}

#[rstest]
fn distinct_names_export_in_parallel(exporter: TestExporter) -> Result<()> {
    let samples: Vec<Arc<Sample>> = (0..THREADS).map(|_| Arc::new(Sample::default())).collect();
    let handles = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let exporter = exporter.clone();
            let sample = Arc::clone(sample);
            thread::spawn(move || {
                exporter
                    .export(&format!("test:type=Sample,id={index}"), &SAMPLE_CLASS, &sample)
                    .map(drop)
            })
        })
        .collect();

    for outcome in join_all(handles)? {
        outcome?;
    }
    let summaries = exporter.list_exports()?;
    ensure!(summaries.len() == THREADS);
    ensure!(summaries.iter().all(|summary| summary.alive));
    Ok(())
}
