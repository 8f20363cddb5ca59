//! Page capacity and fan-out configuration

use crate::error::{Error, Result};
use crate::index::DEFAULT_FAN_OUT;
use crate::isam::Isam;
use crate::overflow::DEFAULT_OVERFLOW_PAGE_CAPACITY;
use crate::page::DEFAULT_DATA_PAGE_CAPACITY;

/// Layout parameters of an ISAM structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsamConfig {
    /// Records per primary data page
    pub data_page_capacity: usize,
    /// Records per overflow page
    pub overflow_page_capacity: usize,
    /// Maximum children per index page
    pub fan_out: usize,
}

impl Default for IsamConfig {
    fn default() -> Self {
        Self {
            data_page_capacity: DEFAULT_DATA_PAGE_CAPACITY,
            overflow_page_capacity: DEFAULT_OVERFLOW_PAGE_CAPACITY,
            fan_out: DEFAULT_FAN_OUT,
        }
    }
}

impl IsamConfig {
    /// Wide pages and a high fan-out, for larger key sets with few inserts
    pub fn read_optimized() -> Self {
        Self { data_page_capacity: 64, overflow_page_capacity: 16, fan_out: 64 }
    }

    /// Check that the layout can be built
    pub fn validate(&self) -> Result<()> {
        if self.data_page_capacity == 0 {
            return Err(Error::InvalidParameter("data page capacity must be at least 1"));
        }
        if self.overflow_page_capacity == 0 {
            return Err(Error::InvalidParameter("overflow page capacity must be at least 1"));
        }
        if self.fan_out < 2 {
            return Err(Error::InvalidParameter("fan-out must be at least 2"));
        }
        Ok(())
    }
}

/// Builder for [`Isam`] instances
#[derive(Debug, Clone, Default)]
pub struct IsamBuilder {
    config: IsamConfig,
}

impl IsamBuilder {
    /// Create a builder with the default layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(config: IsamConfig) -> Self {
        Self { config }
    }

    /// Set the number of records per primary data page
    pub fn data_page_capacity(mut self, capacity: usize) -> Self {
        self.config.data_page_capacity = capacity;
        self
    }

    /// Set the number of records per overflow page
    pub fn overflow_page_capacity(mut self, capacity: usize) -> Self {
        self.config.overflow_page_capacity = capacity;
        self
    }

    /// Set the maximum number of children per index page
    pub fn fan_out(mut self, fan_out: usize) -> Self {
        self.config.fan_out = fan_out;
        self
    }

    /// Validate the configuration and create an empty structure
    pub fn open(self) -> Result<Isam> {
        self.config.validate()?;
        Ok(Isam::with_valid_config(self.config))
    }

    /// Validate the configuration and build a structure from sorted keys
    pub fn build(self, sorted_keys: &[crate::record::Key]) -> Result<Isam> {
        let mut isam = self.open()?;
        isam.build(sorted_keys);
        Ok(isam)
    }
}
