/// Turns a field name into a human label: underscores become spaces and
/// every word is title-cased (`posting_date` becomes `Posting Date`).
///
/// A letter is upper-cased when it follows a non-letter and lower-cased
/// otherwise, so `sales_order_date2` becomes `Sales Order Date2`.
#[must_use]
pub fn humanize_fieldname(fieldname: &str) -> String {
    let mut label = String::with_capacity(fieldname.len());
    let mut previous_is_letter = false;

    for character in fieldname.chars() {
        let character = if character == '_' { ' ' } else { character };

        if character.is_alphabetic() {
            if previous_is_letter {
                label.extend(character.to_lowercase());
            } else {
                label.extend(character.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            label.push(character);
            previous_is_letter = false;
        }
    }

    label
}
