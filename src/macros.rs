/// Constructs a [Value](crate::Value) from a literal.
///
/// # Example
///
/// ```
/// # use jsondom::json;
/// #
/// let val = json!({
///     "Image": {
///         "Width": 800,
///         "Height": 600,
///         "Title": "View from 15th Floor",
///         "IDs": [116, 943, 234, 38793]
///     }
/// });
///
/// assert_eq!(val["Image"]["IDs"][1], 943.0);
/// ```
///
/// This macro is intended for quickly constructing test data. It does **not** perform any escape
/// sequence handling, `"ab\\u0063"` is stored as is and not converted to `"abc"`. Every value has
/// to be a single token tree: negative numbers and expressions need parentheses, `json!((-1))`.
#[macro_export]
macro_rules! json {
    ([]) => { $crate::Value::Array(::std::vec::Vec::new()) };
    ({}) => { $crate::Value::Object($crate::Map::new()) };
    (null) => { $crate::Value::Null };
    (true) => { $crate::Value::Bool(true) };
    (false) => { $crate::Value::Bool(false) };
    ([ $($elem:tt),+ $(,)? ]) => { $crate::Value::Array(vec![$($crate::json!($elem)),+]) };
    ({ $($key:tt: $val:tt),+ $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(map.insert(($key).to_string(), $crate::json!($val));)+
        $crate::Value::Object(map)
    }};
    // a string, a numeric type or anything else that converts into a Value
    ($other:expr) => { $crate::Value::from($other) };
}
