//! Splitting a generated quiz into individual questions

/// Split quiz text into questions.
///
/// A non-empty line that starts with `<digits>.` opens a new question once some text
/// has accumulated. Falls back to the whole quiz when fewer than two questions result.
pub fn split_questions(quiz: &str) -> Vec<String> {
    let mut questions = Vec::new();
    let mut current = String::new();

    for line in quiz.split(['\n', '\r']).filter(|l| !l.is_empty()) {
        if starts_with_number(line) && !current.is_empty() {
            questions.push(current.trim().to_string());
            current = line.to_string();
        } else {
            current.push('\n');
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        questions.push(current.trim().to_string());
    }

    if questions.len() > 1 {
        questions
    } else {
        vec![quiz.to_string()]
    }
}

fn starts_with_number(line: &str) -> bool {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && line.as_bytes().get(digits) == Some(&b'.')
}
