//! Wire records returned by the listing and detail endpoints.
//!
//! Unknown fields are ignored. Missing required fields, or a picture entry
//! that is neither a URL set nor a bare id, fail the whole payload.

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ImageSize;

/// Response body of the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AdPageDto {
    pub data: Vec<AdDto>,
    pub paging: PaginationDto,
}

/// Cursor block of a listing response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub after: Option<String>,
    pub before: Option<String>,
    pub page_length: u32,
}

/// A single ad record, used by both endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AdDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub pictures: Vec<PictureDto>,
}

/// A picture reference.
///
/// The listing returns bare ids while the detail returns URL sets. Only a
/// JSON object decodes as a URL set and only a string as an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PictureDto {
    Urls(PictureUrlsDto),
    Id(String),
}

impl<'de> Deserialize<'de> for PictureDto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PictureVisitor)
    }
}

struct PictureVisitor;

impl<'de> Visitor<'de> for PictureVisitor {
    type Value = PictureDto;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a picture id or an object of picture URLs")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PictureDto::Id(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PictureDto::Id(v))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        PictureUrlsDto::deserialize(MapAccessDeserializer::new(map)).map(PictureDto::Urls)
    }
}

/// Named resolutions of one picture.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PictureUrlsDto {
    pub squares32: Option<String>,
    pub squares64: Option<String>,
    pub squares128: Option<String>,
    pub squares300: Option<String>,
    pub squares600: Option<String>,
    pub resizes1000: Option<String>,
}

impl PictureUrlsDto {
    /// The resolution shown at `size`, if the server provided it.
    pub fn url_for(&self, size: ImageSize) -> Option<&str> {
        match size {
            ImageSize::Thumbnail => self.squares300.as_deref(),
            ImageSize::Large => self.squares600.as_deref(),
        }
    }
}
