//! Geographic point, optionally with a named venue.
//!
//! Layout: `latitude f64, longitude f64, has_venue u8` then, when the marker
//! is `1`, `title str, address str`.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::{AttachmentKind, MediaAttachment};
use crate::error::{DecodeError, Result};
use crate::wire::{check_str, put_bool, put_str, PayloadReader};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    title: String,
    address: String,
}

impl Venue {
    pub fn new(title: impl Into<String>, address: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let address = address.into();
        check_str("venue.title", &title)?;
        check_str("venue.address", &address)?;
        Ok(Self { title, address })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationAttachment {
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    venue: Option<Venue>,
}

impl LocationAttachment {
    /// Latitude in `[-90, 90]`, longitude in `[-180, 180]`, both finite.
    pub fn new(latitude: f64, longitude: f64, venue: Option<Venue>) -> Result<Self> {
        check_coord("latitude", latitude, 90.0)?;
        check_coord("longitude", longitude, 180.0)?;
        Ok(Self {
            latitude: latitude + 0.0,
            longitude: longitude + 0.0,
            venue,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn venue(&self) -> Option<&Venue> {
        self.venue.as_ref()
    }
}

fn check_coord(name: &str, v: f64, limit: f64) -> Result<()> {
    if !v.is_finite() || v.abs() > limit {
        return Err(DecodeError::OutOfRange(format!(
            "{name} must be within [-{limit}, {limit}], got {v}"
        )));
    }
    Ok(())
}

impl MediaAttachment for LocationAttachment {
    const KIND: AttachmentKind = AttachmentKind::Location;

    fn encode_payload(&self, out: &mut BytesMut) {
        out.put_f64_le(self.latitude);
        out.put_f64_le(self.longitude);
        put_bool(out, self.venue.is_some());
        if let Some(v) = &self.venue {
            put_str(out, &v.title);
            put_str(out, &v.address);
        }
    }

    fn decode_payload(payload: Bytes) -> Result<Self> {
        let mut r = PayloadReader::new(payload, "location");
        let latitude = r.f64("latitude")?;
        let longitude = r.f64("longitude")?;
        let venue = if r.bool("has_venue")? {
            let title = r.string("venue.title")?;
            let address = r.string("venue.address")?;
            Some(Venue::new(title, address)?)
        } else {
            None
        };
        r.finish()?;
        Self::new(latitude, longitude, venue)
    }
}
