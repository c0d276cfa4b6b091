/// Title-case a search string: the first letter of every word upper case, the
/// rest lower case. A word starts after any non-alphabetic character, so
/// `"o'neil"` becomes `"O'Neil"` and `"jean-luc"` becomes `"Jean-Luc"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
