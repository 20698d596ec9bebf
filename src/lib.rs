#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use jm_reflect as reflect;
pub use jm_serde as serde;

pub use jm_reflect::{Instance, Value, auto_register};
pub use jm_serde::{DeserializeTarget, JsonSerializer, SerializerError, deserialize, serialize};
