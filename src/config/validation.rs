//! Configuration validation.
//!
//! # Responsibilities
//! - Enforce the closed schema (unknown fields are rejected)
//! - Check field types and numeric ranges
//! - Reject partial fault specifications
//!
//! # Design Decisions
//! - Fails on the first violation; no error accumulation
//! - Validation is a pure function: ConfigDocument → Result<ValidatedConfig, SchemaError>
//! - Runs before any collaborator is constructed

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::schema::{
    ConfigDocument, FaultSpec, ValidatedConfig, ACCESS_LOG, DELAY_PERCENT, DURATION_MS, FAULT,
    FAULT_FIELDS, MAX_DELAY_PERCENT, STAT_PREFIX, TOP_LEVEL_FIELDS,
};

/// Field path used when the document root itself is malformed.
const ROOT: &str = "<root>";

/// Sub-reason of a [`SchemaError`], without the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorKind {
    MissingField,
    UnknownField,
    TypeMismatch,
    IncompleteFaultSpec,
    OutOfRange,
}

/// Schema violation found while validating a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A required field is absent.
    #[error("missing required field '{0}'")]
    MissingField(String),

    /// A field outside the recognized set was supplied.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// A field has the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// The fault object lacks one or both of its fields.
    #[error("fault spec requires both 'delay_percent' and 'duration_ms', missing '{missing}'")]
    IncompleteFaultSpec { missing: &'static str },

    /// A numeric field lies outside its allowed range.
    #[error("field '{field}' value {value} is out of range {range}")]
    OutOfRange {
        field: String,
        value: String,
        range: &'static str,
    },
}

impl SchemaError {
    /// Return the sub-reason of this error.
    pub fn kind(&self) -> SchemaErrorKind {
        match self {
            SchemaError::MissingField(_) => SchemaErrorKind::MissingField,
            SchemaError::UnknownField(_) => SchemaErrorKind::UnknownField,
            SchemaError::TypeMismatch { .. } => SchemaErrorKind::TypeMismatch,
            SchemaError::IncompleteFaultSpec { .. } => SchemaErrorKind::IncompleteFaultSpec,
            SchemaError::OutOfRange { .. } => SchemaErrorKind::OutOfRange,
        }
    }
}

/// Validate a raw document and extract the typed configuration.
pub fn validate(doc: &ConfigDocument) -> Result<ValidatedConfig, SchemaError> {
    let root = as_object(doc, ROOT)?;
    reject_unknown(root, &TOP_LEVEL_FIELDS, None)?;

    let stat_prefix = match root.get(STAT_PREFIX) {
        None => return Err(SchemaError::MissingField(STAT_PREFIX.to_string())),
        Some(value) => as_string(value, STAT_PREFIX)?,
    };
    if stat_prefix.is_empty() {
        return Err(SchemaError::MissingField(STAT_PREFIX.to_string()));
    }

    let access_log_path = root
        .get(ACCESS_LOG)
        .map(|value| as_string(value, ACCESS_LOG).map(str::to_string))
        .transpose()?;

    let fault = root.get(FAULT).map(validate_fault).transpose()?;

    Ok(ValidatedConfig {
        stat_prefix: stat_prefix.to_string(),
        access_log_path,
        fault,
    })
}

fn validate_fault(value: &Value) -> Result<FaultSpec, SchemaError> {
    let fault = as_object(value, FAULT)?;
    reject_unknown(fault, &FAULT_FIELDS, Some(FAULT))?;

    let (percent, duration) = match (fault.get(DELAY_PERCENT), fault.get(DURATION_MS)) {
        (Some(percent), Some(duration)) => (percent, duration),
        (_, None) => {
            return Err(SchemaError::IncompleteFaultSpec {
                missing: DURATION_MS,
            })
        }
        (None, Some(_)) => {
            return Err(SchemaError::IncompleteFaultSpec {
                missing: DELAY_PERCENT,
            })
        }
    };

    Ok(FaultSpec {
        delay_percent: delay_percent(percent)?,
        duration_ms: duration_ms(duration)?,
    })
}

fn delay_percent(value: &Value) -> Result<u32, SchemaError> {
    let field = format!("{FAULT}.{DELAY_PERCENT}");
    let shown = match (value.as_u64(), value.as_i64()) {
        (Some(percent), _) => match u32::try_from(percent) {
            Ok(p) if p <= MAX_DELAY_PERCENT => return Ok(p),
            _ => percent.to_string(),
        },
        (None, Some(negative)) => negative.to_string(),
        (None, None) => {
            return Err(SchemaError::TypeMismatch {
                field,
                expected: "an integer",
            })
        }
    };
    Err(SchemaError::OutOfRange {
        field,
        value: shown,
        range: "[0, 100]",
    })
}

fn duration_ms(value: &Value) -> Result<u64, SchemaError> {
    let field = format!("{FAULT}.{DURATION_MS}");
    if let Some(ms) = value.as_u64() {
        return Ok(ms);
    }
    match value.as_i64() {
        Some(negative) => Err(SchemaError::OutOfRange {
            field,
            value: negative.to_string(),
            range: ">= 0",
        }),
        None => Err(SchemaError::TypeMismatch {
            field,
            expected: "an integer",
        }),
    }
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| SchemaError::TypeMismatch {
        field: field.to_string(),
        expected: "an object",
    })
}

fn as_string<'a>(value: &'a Value, field: &str) -> Result<&'a str, SchemaError> {
    value.as_str().ok_or_else(|| SchemaError::TypeMismatch {
        field: field.to_string(),
        expected: "a string",
    })
}

fn reject_unknown(
    object: &Map<String, Value>,
    allowed: &[&str],
    parent: Option<&str>,
) -> Result<(), SchemaError> {
    match object.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(SchemaError::UnknownField(match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        })),
        None => Ok(()),
    }
}
