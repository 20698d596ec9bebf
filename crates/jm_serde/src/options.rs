//! Serializer configuration.
//!
//! ## Menu
//!
//! - [`JsonSerializerOptions`]: everything a [`JsonSerializer`](crate::JsonSerializer) can be told.
//! - [`Policy`]: `allow`, `remove` or `disallow` a kind of value.
//! - [`NullishPolicy`]: one [`Policy`] for `undefined`, one for `null`.
//! - [`ErrorCallback`]: what happens to reported errors.
//! - [`SerializerConfig`]: the data-only part of the options, loadable with `serde`.

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use jm_reflect::Value;
use jm_reflect::info::FormatPropertyName;
use serde::{Deserialize, Serialize};

use crate::SerializerError;

// -----------------------------------------------------------------------------
// Policy

/// What to do with a value a policy applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Keep it.
    Allow,
    /// Report it as an error, and leave it out.
    Disallow,
    /// Leave it out silently.
    Remove,
}

// -----------------------------------------------------------------------------
// NullishPolicy

/// Independent policies for `undefined` and `null` values.
///
/// Defaults to removing `undefined` and allowing `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NullishPolicy {
    pub undefined: Policy,
    pub null: Policy,
}

impl Default for NullishPolicy {
    #[inline]
    fn default() -> Self {
        Self {
            undefined: Policy::Remove,
            null: Policy::Allow,
        }
    }
}

impl NullishPolicy {
    /// The policy applying to `value`, `None` if it is not nullish.
    #[inline]
    pub fn policy_for(&self, value: &Value) -> Option<Policy> {
        match value {
            Value::Undefined => Some(self.undefined),
            Value::Null => Some(self.null),
            _ => None,
        }
    }
}

impl From<bool> for NullishPolicy {
    /// The `removeUndefined` flag: `true` removes `undefined` values, `false` keeps them.
    /// `null` values are always kept.
    #[inline]
    fn from(remove_undefined: bool) -> Self {
        Self {
            undefined: if remove_undefined {
                Policy::Remove
            } else {
                Policy::Allow
            },
            null: Policy::Allow,
        }
    }
}

// -----------------------------------------------------------------------------
// ErrorCallback

/// Receives every error a conversion reports.
///
/// Returning `Ok` lets the conversion go on, with `Undefined` in place of the
/// offending value. Returning `Err` aborts the whole conversion with that error.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use jm_serde::options::ErrorCallback;
///
/// let messages = Arc::new(Mutex::new(Vec::new()));
/// let sink = messages.clone();
/// let callback = ErrorCallback::new(move |error| {
///     sink.lock().unwrap().push(error.to_string());
///     Ok(())
/// });
/// # let _ = callback;
/// ```
#[derive(Clone)]
pub struct ErrorCallback(Arc<dyn Fn(SerializerError) -> Result<(), SerializerError> + Send + Sync>);

impl ErrorCallback {
    #[inline]
    pub fn new(
        f: impl Fn(SerializerError) -> Result<(), SerializerError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    /// Logs errors at `error` level and goes on. The default.
    #[inline]
    pub fn log() -> Self {
        Self::new(log_error)
    }

    /// Aborts on the first error.
    #[inline]
    pub fn throw() -> Self {
        Self::new(throw_error)
    }

    #[inline]
    pub fn call(&self, error: SerializerError) -> Result<(), SerializerError> {
        (self.0)(error)
    }
}

impl fmt::Debug for ErrorCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorCallback(..)")
    }
}

/// Logs `error` and goes on.
pub fn log_error(error: SerializerError) -> Result<(), SerializerError> {
    log::error!("{error}");
    Ok(())
}

/// Aborts with `error`.
#[inline]
pub fn throw_error(error: SerializerError) -> Result<(), SerializerError> {
    Err(error)
}

// -----------------------------------------------------------------------------
// SerializerConfig

/// The data-only part of [`JsonSerializerOptions`].
///
/// # Examples
///
/// ```
/// use jm_serde::options::{JsonSerializerOptions, Policy, SerializerConfig};
///
/// let config: SerializerConfig = serde_json::from_str(
///     r#"{ "nullish_policy": { "null": "remove" }, "additional_properties_policy": "disallow" }"#,
/// )
/// .unwrap();
///
/// let options = JsonSerializerOptions::from(config);
/// assert_eq!(options.nullish_policy.null, Policy::Remove);
/// assert_eq!(options.nullish_policy.undefined, Policy::Remove);
/// assert_eq!(options.additional_properties_policy, Policy::Disallow);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    pub nullish_policy: NullishPolicy,
    pub additional_properties_policy: Policy,
}

impl Default for SerializerConfig {
    #[inline]
    fn default() -> Self {
        Self {
            nullish_policy: NullishPolicy::default(),
            additional_properties_policy: Policy::Remove,
        }
    }
}

// -----------------------------------------------------------------------------
// JsonSerializerOptions

/// Options of a [`JsonSerializer`](crate::JsonSerializer).
///
/// Override part of the defaults with struct update syntax:
///
/// ```
/// use jm_serde::options::{ErrorCallback, JsonSerializerOptions, Policy};
///
/// let options = JsonSerializerOptions {
///     error_callback: Some(ErrorCallback::throw()),
///     additional_properties_policy: Policy::Allow,
///     ..Default::default()
/// };
/// assert_eq!(options.nullish_policy.null, Policy::Allow);
/// ```
#[derive(Clone, Debug)]
pub struct JsonSerializerOptions {
    /// `None` swallows errors silently.
    pub error_callback: Option<ErrorCallback>,
    pub nullish_policy: NullishPolicy,
    /// Fields of an instance, or keys of the input, no property accounts for.
    pub additional_properties_policy: Policy,
    /// Applied to property names that were not overridden, unless their class
    /// declares its own formatter.
    pub format_property_name: Option<FormatPropertyName>,
}

impl Default for JsonSerializerOptions {
    fn default() -> Self {
        Self {
            error_callback: Some(ErrorCallback::log()),
            nullish_policy: NullishPolicy::default(),
            additional_properties_policy: Policy::Remove,
            format_property_name: None,
        }
    }
}

impl JsonSerializerOptions {
    #[inline]
    pub fn with_error_callback(mut self, error_callback: Option<ErrorCallback>) -> Self {
        self.error_callback = error_callback;
        self
    }

    #[inline]
    pub fn with_nullish_policy(mut self, nullish_policy: impl Into<NullishPolicy>) -> Self {
        self.nullish_policy = nullish_policy.into();
        self
    }

    #[inline]
    pub fn with_additional_properties_policy(mut self, policy: Policy) -> Self {
        self.additional_properties_policy = policy;
        self
    }

    #[inline]
    pub fn with_format_property_name(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format_property_name = Some(FormatPropertyName::new(f));
        self
    }

    /// Applies the policies of `config`, keeping the callbacks.
    #[inline]
    pub fn with_config(mut self, config: SerializerConfig) -> Self {
        self.nullish_policy = config.nullish_policy;
        self.additional_properties_policy = config.additional_properties_policy;
        self
    }
}

impl From<SerializerConfig> for JsonSerializerOptions {
    #[inline]
    fn from(config: SerializerConfig) -> Self {
        Self::default().with_config(config)
    }
}

// -----------------------------------------------------------------------------
// Tests
