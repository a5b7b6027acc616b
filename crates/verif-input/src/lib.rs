//! Loading verification datasets into one canonical snapshot.
//!
//! Three on-disk layouts are supported: verif CF NetCDF, legacy COMPS
//! NetCDF and whitespace-delimited text. [`get_input`] detects the layout
//! and returns an [`Input`] holding observations, deterministic forecasts
//! and probabilistic scores on `[date, offset, location]` axes.
//!
//! # Example
//!
//! ```no_run
//! use verif_input::get_input;
//!
//! let input = get_input("~/verif/precip.txt")?;
//! println!("{} locations, {} dates", input.locations().len(), input.dates().len());
//! # Ok::<(), verif_input::InputError>(())
//! ```

pub mod comps;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod key;
pub mod naming;
pub mod netcdf_cf;
pub mod registry;
pub mod text;
pub mod warning;

mod nc;

pub use comps::Comps;
pub use config::LoadConfig;
pub use dispatch::{
    detect_format, detect_format_in, get_input, get_input_with_config, Decoder, Format, InputSource,
};
pub use error::{InputError, InputResult};
pub use input::Input;
pub use nc::silence_hdf5_errors;
pub use netcdf_cf::NetcdfCf;
pub use registry::{LocationRegistry, Lookup};
pub use text::Text;
pub use warning::LoadWarning;

pub use verif_common::{Location, Variable};
