/// Documented types that are known to be wrong on the page, keyed by
/// (function, parameter). The runtime accepts any encodable value where the
/// docs claim string.
const TYPE_OVERRIDES: &[((&str, &str), &str)] = &[
    (("json_encode", "value"), "any"),
    (("logger_info", "vars"), "any"),
    (("logger_error", "vars"), "any"),
    (("logger_warn", "vars"), "any"),
];

/// Forced type for a (function, parameter) pair, if a correction exists.
pub fn type_override(function: &str, parameter: &str) -> Option<&'static str> {
    TYPE_OVERRIDES
        .iter()
        .find(|((f, p), _)| *f == function && *p == parameter)
        .map(|(_, ty)| *ty)
}
