use serde_json::{Map, Value};

/// Deep merges `source` into `target`.
///
/// Objects merge key by key, arrays merge element by index (a longer source
/// extends the target) and anything else is overwritten by the source.
pub fn merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => merge_objects(target, source),
        (Value::Array(target), Value::Array(source)) => {
            for (index, item) in source.into_iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => merge(existing, item),
                    None => target.push(item),
                }
            }
        }
        (target, source) => *target = source,
    }
}

pub fn merge_objects(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) => merge(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod merge_tests;
