//! Business constants shared by the domain model and the command validators.

pub const DEFAULT_CURRENCY: &str = "BRL";
pub const DEFAULT_COUNTRY: &str = "Brasil";

/// Employees must be at least this old when hired or updated.
pub const MINIMUM_AGE: u32 = 18;

/// Birth dates before this year are rejected.
pub const MINIMUM_BIRTH_YEAR: i32 = 1900;

pub const CPF_LENGTH: usize = 11;
pub const CNPJ_LENGTH: usize = 14;

// Column sizes, mirrored by the command validators
pub const NAME_MAX_LENGTH: u64 = 50;
pub const EMAIL_MAX_LENGTH: u64 = 254;
pub const POSITION_MAX_LENGTH: u64 = 100;
pub const STREET_MAX_LENGTH: u64 = 100;
pub const NUMBER_MAX_LENGTH: u64 = 20;
pub const COMPLEMENT_MAX_LENGTH: u64 = 100;
pub const NEIGHBORHOOD_MAX_LENGTH: u64 = 100;
pub const CITY_MAX_LENGTH: u64 = 100;
pub const STATE_MAX_LENGTH: u64 = 50;
pub const ZIP_CODE_MAX_LENGTH: u64 = 20;
pub const COUNTRY_MAX_LENGTH: u64 = 50;

// Paging for list queries
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
