//! Game Character Generator - client-side response model
//!
//! This crate contains the types returned by the Game Character Generator API
//! and the helpers to move them across the wire:
//! - Character sheet records (`CharacterSheet`, `RaceInfo`, `ClassInfo`, ...)
//! - A JSON codec that ignores unknown keys and reports mismatched field paths
//! - Query options for the generator endpoint and the response envelope
//! - Tolerant date/time parsing with a fixed cascade of formats
//!
//! # Design Principles
//!
//! 1. **No I/O** - the HTTP transport lives elsewhere
//! 2. **Explicit wire names** - declared once in [`wire`], including the
//!    reserved word `class`
//! 3. **Immutable shared state** - the default codec is built once and never
//!    mutated

pub mod character_sheet;
pub mod codec;
pub mod common;
pub mod error;
pub mod requests;
pub mod responses;
pub mod wire;

pub use character_sheet::{
    Ability, AbilityScore, AbilityScores, CharacterSheet, ClassInfo, RaceInfo,
};
pub use codec::{decode, decode_response, encode, Codec, CodecConfig};
pub use common::{parse_date_time, parse_time, DateTimeParseError, OffsetTime};
pub use error::GeneratorError;
pub use requests::{GenerateCharacterQuery, KNOWN_CLASSES, KNOWN_RACES};
pub use responses::ApiResponse;
