use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Error};
use err_derive::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A typed identifier: a plain integer on the wire, rendered with the
/// entity's prefix (eg `order-1718112000000`) for humans.
pub struct Id<T> {
    val: i64,
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, Error)]
enum IdParseError {
    #[error(display = "Invalid prefix")]
    InvalidPrefix,
    #[error(display = "Unparseable Id")]
    Unparseable,
}

pub trait Entity {
    const PREFIX: &'static str;
}

const DIVIDER: &str = "-";

impl<T> Id<T> {
    pub fn value(&self) -> i64 {
        self.val
    }
}

impl<T> From<i64> for Id<T> {
    fn from(val: i64) -> Self {
        Id {
            val,
            phantom: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Display for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}{}{}", T::PREFIX, DIVIDER, self.val)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Id").field("val", &self.val).finish()
    }
}

impl<T: Entity> std::str::FromStr for Id<T> {
    type Err = Error;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if T::PREFIX.len() > src.len() {
            bail!(IdParseError::InvalidPrefix);
        }
        let (start, remainder) = src.split_at(T::PREFIX.len());
        if start != T::PREFIX {
            bail!(IdParseError::InvalidPrefix);
        }
        if remainder.len() < 2 {
            bail!(IdParseError::Unparseable);
        }
        let (divider, digits) = remainder.split_at(1);

        if divider != DIVIDER {
            bail!(IdParseError::Unparseable);
        }

        let val = digits
            .parse::<i64>()
            .map_err(|_| IdParseError::Unparseable)?;
        if val < 0 {
            bail!(IdParseError::Unparseable);
        }
        Ok(Id::from(val))
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Id::from(0)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id::from(self.val)
    }
}

impl<T> Copy for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state);
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.val)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Id::from)
    }
}

/// Issues clock-derived ids (epoch milliseconds), strictly increasing
/// within a process so back-to-back calls can never collide.
#[derive(Debug, Default)]
pub struct IdGen {
    last: Mutex<i64>,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate<T>(&self) -> Id<T> {
        let now = clock_millis();
        let mut last = self.last.lock().expect("idgen lock");
        let val = if now > *last { now } else { *last + 1 };
        *last = val;
        Id::from(val)
    }
}

fn clock_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
