//! Test utilities for visitors and mappers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::Schema;

use crate::{Command, Error, ResponseVisitor, Result, visitors::fields_mut};

/// One lifecycle call observed by a [`RecordingVisitor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Before { visitor: String },
    Visit { visitor: String, property: String },
    After { visitor: String },
}

impl Call {
    pub fn before(visitor: &str) -> Self {
        Call::Before {
            visitor: visitor.to_string(),
        }
    }

    pub fn visit(visitor: &str, property: &str) -> Self {
        Call::Visit {
            visitor: visitor.to_string(),
            property: property.to_string(),
        }
    }

    pub fn after(visitor: &str) -> Self {
        Call::After {
            visitor: visitor.to_string(),
        }
    }
}

/// A call log shared between several recording visitors.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A visitor that records its lifecycle calls into a [`CallLog`].
///
/// By default `visit` writes `null` under the property name.
#[derive(Debug, Clone)]
pub struct RecordingVisitor {
    name: &'static str,
    log: CallLog,
    value: Value,
    fail: bool,
}

impl RecordingVisitor {
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self {
            name,
            log,
            value: Value::Null,
            fail: false,
        }
    }

    /// Write `value` for every visited property.
    pub fn writing(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Fail every `visit`.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl ResponseVisitor for RecordingVisitor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn before(&self, _command: &Command, _response: &Response, _result: &mut Value) -> Result<()> {
        self.log.push(Call::before(self.name));
        Ok(())
    }

    fn visit(
        &self,
        _command: &Command,
        _response: &Response,
        schema: &Schema,
        result: &mut Value,
    ) -> Result<()> {
        self.log.push(Call::visit(self.name, &schema.name));
        if self.fail {
            return Err(Error::visitor(self.name, format!("refused '{}'", schema.name)));
        }
        fields_mut(result).insert(schema.name.clone(), self.value.clone());
        Ok(())
    }

    fn after(&self, _command: &Command) -> Result<()> {
        self.log.push(Call::after(self.name));
        Ok(())
    }
}
