//! Common types and data structures

use crate::constants::UNSET;
use crate::error::FetchError;
use serde::Deserialize;
use std::fmt;

/// State abbreviation (e.g. "SP")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionCode(String);

/// City name within a state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalityName(String);

macro_rules! picker_value {
    ($ty:ident) => {
        impl $ty {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn unset() -> Self {
                Self(UNSET.to_string())
            }

            pub fn is_unset(&self) -> bool {
                self.0 == UNSET
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::unset()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

picker_value!(RegionCode);
picker_value!(LocalityName);

/// The pair the user is building on the Home screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub region: RegionCode,
    pub locality: LocalityName,
}

/// Options for one picker, as loaded from the catalog service
#[derive(Debug, Clone, PartialEq)]
pub enum Catalog<T> {
    Empty,
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Catalog::Empty
    }
}

impl<T> Catalog<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Catalog::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Catalog::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Catalog::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn from_result(result: Result<Vec<T>, FetchError>) -> Self {
        match result {
            Ok(items) => Catalog::Ready(items),
            Err(e) => Catalog::Failed(e.user_message()),
        }
    }
}

/// City list together with the state it was loaded for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalityCatalog {
    pub region: Option<RegionCode>,
    pub catalog: Catalog<LocalityName>,
}

impl LocalityCatalog {
    pub fn loading(region: RegionCode) -> Self {
        Self {
            region: Some(region),
            catalog: Catalog::Loading,
        }
    }
}

/// Result of a catalog read, posted back to the UI thread.
/// Locality results carry the region they were requested for.
#[derive(Debug)]
pub enum CatalogEvent {
    Regions(Result<Vec<RegionCode>, FetchError>),
    Localities {
        region: RegionCode,
        result: Result<Vec<LocalityName>, FetchError>,
    },
}

/// State record from the IBGE `estados` endpoint
#[derive(Debug, Deserialize)]
pub struct IbgeUf {
    pub sigla: String,
}

/// Municipality record from the IBGE `municipios` endpoint
#[derive(Debug, Deserialize)]
pub struct IbgeCity {
    pub nome: String,
}
