/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become [`Value::Map`](crate::Value::Map), arrays become
/// [`Value::Seq`](crate::Value::Seq), and any other expression goes through
/// [`to_value`](crate::to_value).
///
/// # Examples
///
/// ```rust
/// use urlform::urlform;
///
/// let body = urlform!({
///     "device": "pixel",
///     "port": 8080,
/// });
/// assert_eq!(body.encode(), "device=pixel&port=8080");
/// ```
#[macro_export]
macro_rules! urlform {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty sequence
    ([]) => {
        $crate::Value::Seq(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Seq(vec![$($crate::urlform!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Map($crate::FormMap::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::FormMap::new();
        $(
            map.insert($key.to_string(), $crate::urlform!($value));
        )*
        $crate::Value::Map(map)
    }};

    // Fallback for any other expression
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{FormMap, Number, Value};

    #[test]
    fn test_urlform_macro_primitives() {
        assert_eq!(urlform!(null), Value::Null);
        assert_eq!(urlform!(true), Value::Bool(true));
        assert_eq!(urlform!(false), Value::Bool(false));
        assert_eq!(urlform!(42), Value::Number(Number::Integer(42)));
        assert_eq!(urlform!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(urlform!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_urlform_macro_sequences() {
        assert_eq!(urlform!([]), Value::Seq(vec![]));

        let seq = urlform!(["a", "b"]);
        assert_eq!(
            seq,
            Value::Seq(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(seq.encode(), "=a&=b");
    }

    #[test]
    fn test_urlform_macro_mappings() {
        assert_eq!(urlform!({}), Value::Map(FormMap::new()));

        let body = urlform!({
            "device": "pixel",
            "retries": 3
        });
        assert_eq!(body.encode(), "device=pixel&retries=3");
    }

    #[test]
    fn test_urlform_macro_nested() {
        let body = urlform!({
            "tags": ["a", "b"],
            "port": 8080
        });
        assert_eq!(body.encode(), "=a&=b&port=8080");
    }
}
