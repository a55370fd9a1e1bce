//! Shared fixtures for in-memory exporter integration tests.

use manageable::export::{
    adapters::memory::InMemoryManagedObjectRepository, services::ObjectExporter,
};
use manageable::reflect::domain::{ClassInfo, InvocationError, MethodInfo, Value, ValueType};
use mockable::DefaultClock;
use once_cell::sync::Lazy;
use rstest::fixture;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Exporter backed by the in-memory repository.
pub type TestExporter = ObjectExporter<InMemoryManagedObjectRepository, DefaultClock>;

/// Name under which [`Sample`] is exported.
pub const SAMPLE_NAME: &str = "test:type=Sample";

/// Provides a fresh exporter for each test.
#[fixture]
pub fn exporter() -> TestExporter {
    ObjectExporter::new(
        Arc::new(InMemoryManagedObjectRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Mutable state behind [`Sample`].
#[derive(Debug, Default)]
pub struct SampleState {
    pub boolean: bool,
    pub boxed_boolean: Option<bool>,
    pub byte: i8,
    pub boxed_byte: Option<i8>,
    pub short: i16,
    pub boxed_short: Option<i16>,
    pub int: i32,
    pub boxed_int: Option<i32>,
    pub long: i64,
    pub boxed_long: Option<i64>,
    pub float: f32,
    pub boxed_float: Option<f32>,
    pub double: f64,
    pub boxed_double: Option<f64>,
    pub string: Option<String>,
    pub object: Value,
    pub not_managed: i32,
    pub write_only: i32,
    pub read_only: i32,
}

/// An object exposing one attribute per value shape.
#[derive(Debug, Default)]
pub struct Sample {
    state: Mutex<SampleState>,
    invocations: AtomicI64,
}

impl Sample {
    /// Creates a sample whose read-only attribute has the given value.
    #[must_use]
    pub fn with_read_only(read_only: i32) -> Self {
        let sample = Self::default();
        sample.state().read_only = read_only;
        sample
    }

    /// Locks the sample state.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    pub fn state(&self) -> MutexGuard<'_, SampleState> {
        self.state.lock().expect("sample state lock")
    }

    /// Returns how many operations have run.
    #[must_use]
    pub fn invocations(&self) -> i64 {
        self.invocations.load(Ordering::SeqCst)
    }
}

macro_rules! attribute {
    ($reader:literal, $writer:literal, $field:ident: $ty:ty) => {
        [
            MethodInfo::getter($reader, |s: &Sample| s.state().$field).managed(),
            MethodInfo::setter($writer, |s: &Sample, v: $ty| s.state().$field = v).managed(),
        ]
    };
    ($reader:literal, $writer:literal, $field:ident: $ty:ty, clone) => {
        [
            MethodInfo::getter($reader, |s: &Sample| s.state().$field.clone()).managed(),
            MethodInfo::setter($writer, |s: &Sample, v: $ty| s.state().$field = v).managed(),
        ]
    };
}

fn sample_methods() -> Vec<MethodInfo> {
    let attributes = [
        attribute!("isBoolean", "setBoolean", boolean: bool),
        attribute!("getBoxedBoolean", "setBoxedBoolean", boxed_boolean: Option<bool>),
        attribute!("getByte", "setByte", byte: i8),
        attribute!("getBoxedByte", "setBoxedByte", boxed_byte: Option<i8>),
        attribute!("getShort", "setShort", short: i16),
        attribute!("getBoxedShort", "setBoxedShort", boxed_short: Option<i16>),
        attribute!("getInt", "setInt", int: i32),
        attribute!("getBoxedInt", "setBoxedInt", boxed_int: Option<i32>),
        attribute!("getLong", "setLong", long: i64),
        attribute!("getBoxedLong", "setBoxedLong", boxed_long: Option<i64>),
        attribute!("getFloat", "setFloat", float: f32),
        attribute!("getBoxedFloat", "setBoxedFloat", boxed_float: Option<f32>),
        attribute!("getDouble", "setDouble", double: f64),
        attribute!("getBoxedDouble", "setBoxedDouble", boxed_double: Option<f64>),
        attribute!("getString", "setString", string: Option<String>, clone),
        attribute!("getObject", "setObject", object: Value, clone),
    ];

    let mut methods: Vec<MethodInfo> = attributes.into_iter().flatten().collect();
    methods.extend([
        MethodInfo::getter("getNotManaged", |s: &Sample| s.state().not_managed),
        MethodInfo::setter("setNotManaged", |s: &Sample, v: i32| s.state().not_managed = v),
        MethodInfo::setter("setWriteOnly", |s: &Sample, v: i32| s.state().write_only = v).managed(),
        MethodInfo::getter("getReadOnly", |s: &Sample| s.state().read_only).managed(),
        MethodInfo::operation::<Sample, _>(
            "echo",
            [ValueType::OBJECT.nullable()],
            ValueType::OBJECT.nullable(),
            |s, args| {
                s.invocations.fetch_add(1, Ordering::SeqCst);
                args.get::<Value>(0)
            },
        )
        .described("Returns its argument"),
        MethodInfo::operation::<Sample, _>("fail", [], ValueType::VOID, |s, _args| {
            s.invocations.fetch_add(1, Ordering::SeqCst);
            Err(InvocationError::failed(std::io::Error::other(
                "sample failure",
            )))
        })
        .managed(),
    ]);
    methods
}

/// Metadata for [`Sample`].
pub static SAMPLE_CLASS: Lazy<Arc<ClassInfo>> = Lazy::new(|| {
    ClassInfo::class::<Sample>("Sample")
        .methods(sample_methods())
        .build()
        .expect("sample class is valid")
});

/// Exports a fresh [`Sample`] under [`SAMPLE_NAME`] and returns it.
///
/// # Errors
///
/// Returns an error if the export fails.
pub fn export_sample(exporter: &TestExporter, read_only: i32) -> eyre::Result<Arc<Sample>> {
    let sample = Arc::new(Sample::with_read_only(read_only));
    exporter.export(SAMPLE_NAME, &SAMPLE_CLASS, &sample)?;
    Ok(sample)
}
