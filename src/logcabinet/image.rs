//! # Image Decoding Boundary
//!
//! Evaluation runs log what happens while decoding biometric images, but the
//! decoding itself belongs to an external codec. This module only fixes the
//! shape of that collaboration: an [`ImageDecoder`] turns encoded bytes into a
//! [`DecodedImage`], reporting warnings and errors through a status callback.
//! Decoder failures are reported as `CabinetError::Strategy`.
//!
//! [`status_to_sheet`] adapts a [`LogSheet`] into such a callback, so codec
//! diagnostics land in the run's log as numbered entries.

use crate::error::Result;
use crate::sheet::LogSheet;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Warning,
    Error,
}

/// A diagnostic raised by a decoder about one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeStatus {
    pub kind: StatusKind,
    pub message: String,
    pub identifier: String,
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            StatusKind::Warning => "WARNING",
            StatusKind::Error => "ERROR",
        };
        write!(f, "{} [{}] {}", tag, self.identifier, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionUnits {
    /// Pixels per inch.
    Ppi,
    /// Pixels per centimeter.
    Ppcm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
    pub units: ResolutionUnits,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Bits per channel sample.
    pub bit_depth: u8,
    /// Bits per pixel across all channels.
    pub color_depth: u8,
    pub has_alpha: bool,
    pub resolution: Resolution,
}

/// An external codec.
pub trait ImageDecoder {
    fn decode(
        &self,
        identifier: &str,
        encoded: &[u8],
        status: &mut dyn FnMut(&DecodeStatus),
    ) -> Result<DecodedImage>;
}

/// Status callback that records each diagnostic as an entry in `sheet`.
///
/// The callback has no way to report failure, so a sheet write error is
/// logged and dropped.
pub fn status_to_sheet(sheet: &mut LogSheet) -> impl FnMut(&DecodeStatus) + '_ {
    move |status: &DecodeStatus| {
        if let Err(e) = sheet.write(&status.to_string()) {
            warn!("Could not log decoder status to {}: {}", sheet.path().display(), e);
        }
    }
}
