/// Map a classifier class code to its sentiment label.
///
/// Total over all inputs: an unexpected code degrades to "unknown" instead of
/// failing the request.
pub fn sentiment_label(code: i32) -> &'static str {
    match code {
        -1 => "negative",
        0 => "neutral",
        1 => "positive",
        _ => "unknown",
    }
}
