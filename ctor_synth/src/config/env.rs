//! Environment provider that reads list settings as comma-separated values.
//!
//! Wraps `figment::providers::Env`. Keys named in `list_keys` always produce
//! arrays, so `CTOR_SYNTH_NON_NULL=NonNull` yields a one-element list rather
//! than a bare string. Other keys contain a list only when their value holds a
//! comma and does not look like structured data.

use figment::providers::Env;
use figment::{
    Profile, Provider,
    error::Error,
    util::nest,
    value::{Dict, Map, Value},
};

/// Environment provider with list support for selected keys.
#[derive(Clone)]
pub(crate) struct ListEnv {
    inner: Env,
    list_keys: &'static [&'static str],
}

impl ListEnv {
    /// Reads variables starting with `prefix`; `list_keys` are lowercase.
    pub(crate) fn prefixed(prefix: &str, list_keys: &'static [&'static str]) -> Self {
        Self {
            inner: Env::prefixed(prefix),
            list_keys,
        }
    }

    fn should_parse_as_csv(value: &str) -> bool {
        value.contains(',') && !matches!(value.chars().next(), Some('[' | '{' | '"' | '\''))
    }

    fn split(value: &str) -> Value {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::from(item.to_owned()))
            .collect::<Vec<_>>()
            .into()
    }

    fn parse_value(&self, key: &str, raw: &str) -> Value {
        let trimmed = raw.trim();
        if self.list_keys.contains(&key) || Self::should_parse_as_csv(trimmed) {
            Self::split(trimmed)
        } else {
            trimmed
                .parse()
                .unwrap_or_else(|_| Value::from(trimmed.to_owned()))
        }
    }
}

impl Provider for ListEnv {
    fn metadata(&self) -> figment::Metadata {
        self.inner.metadata()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.inner.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (key, raw) in self.inner.iter() {
            let value = self.parse_value(key.as_str(), &raw);
            let Some(nested) = nest(key.as_str(), value).into_dict() else {
                return Err(Error::from(format!(
                    "environment key `{key}` produced a non-object value"
                )));
            };
            dict.extend(nested);
        }
        Ok(self.inner.profile.collect(dict))
    }
}
