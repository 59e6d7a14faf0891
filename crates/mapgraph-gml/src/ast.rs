#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<Entry>),
}

impl Value {
    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Entry]> {
        match self {
            Value::List(entries) => Some(entries),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
    pub offset: usize,
}

impl Entry {
    pub fn new(key: &str, value: Value) -> Self {
        Self {
            key: key.to_string(),
            value,
            offset: 0,
        }
    }

    pub fn int(key: &str, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn real(key: &str, value: f64) -> Self {
        Self::new(key, Value::Real(value))
    }

    pub fn string(key: &str, value: &str) -> Self {
        Self::new(key, Value::Str(value.to_string()))
    }

    pub fn list(key: &str, entries: Vec<Entry>) -> Self {
        Self::new(key, Value::List(entries))
    }
}

/// A parsed GML file: the top-level key/value sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub entries: Vec<Entry>,
}

impl Document {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

/// All values stored under `key`, in file order. GML encodes a sequence
/// attribute by repeating its key, so lookups are always multi-valued.
pub fn values_of<'a>(entries: &'a [Entry], key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
    entries
        .iter()
        .filter(move |entry| entry.key == key)
        .map(|entry| &entry.value)
}

pub fn first_of<'a>(entries: &'a [Entry], key: &str) -> Option<&'a Entry> {
    entries.iter().find(|entry| entry.key == key)
}
