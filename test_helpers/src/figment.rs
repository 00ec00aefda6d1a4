//! Helpers for running settings tests inside a `figment::Jail`.
//!
//! The jail gives each test a scratch working directory and an isolated
//! environment, so `CTOR_SYNTH_` variables and settings files never leak
//! between tests.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `name` inside the jail and returns the file name.
///
/// # Errors
///
/// Returns the jail's I/O error when the file cannot be written.
pub fn settings_file<'a>(
    jail: &mut figment::Jail,
    name: &'a str,
    contents: &str,
) -> figment::error::Result<&'a str> {
    jail.create_file(name, contents)?;
    Ok(name)
}

/// Converts any displayable error into a [`figment::Error`] so it can cross
/// the jail boundary.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over owned errors from `?` chains"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
