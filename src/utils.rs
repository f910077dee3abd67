/// Title-cases a canonical lowercase name ("new york city" -> "New York City").
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a second count as `[D day(s) ]HH:MM:SS`.
pub fn fmt_seconds(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let total = total_seconds.unsigned_abs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    if days > 0 {
        let unit = if days == 1 { "day" } else { "days" };
        format!("{sign}{days} {unit} {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_multiple_words() {
        assert_eq!(title_case("chicago"), "Chicago");
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn fmt_seconds_rolls_into_days() {
        assert_eq!(fmt_seconds(0), "00:00:00");
        assert_eq!(fmt_seconds(61), "00:01:01");
        assert_eq!(fmt_seconds(86_399), "23:59:59");
        assert_eq!(fmt_seconds(86_400), "1 day 00:00:00");
        assert_eq!(fmt_seconds(2 * 86_400 + 3_661), "2 days 01:01:01");
        assert_eq!(fmt_seconds(-61), "-00:01:01");
    }
}
