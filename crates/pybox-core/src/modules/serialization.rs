use serde_json::Number;

/// Renders numbers the way they arrived in the request, separated by single
/// spaces. Integers stay integers (`2500`), floats keep their shortest
/// round-trip form (`0.05`).
pub fn join_numbers<'a, I>(numbers: I) -> String
where
    I: IntoIterator<Item = &'a Number>,
{
    numbers
        .into_iter()
        .map(Number::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
