use std::fmt;

use serde::{Deserialize, Serialize};

/// 选项字母（A-D）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceLetter {
    A,
    B,
    C,
    D,
}

impl ChoiceLetter {
    pub const ALL: [ChoiceLetter; 4] = [
        ChoiceLetter::A,
        ChoiceLetter::B,
        ChoiceLetter::C,
        ChoiceLetter::D,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(ChoiceLetter::A),
            'B' => Some(ChoiceLetter::B),
            'C' => Some(ChoiceLetter::C),
            'D' => Some(ChoiceLetter::D),
            _ => None,
        }
    }

    /// 从字符串首字符解析，例如 "B" 或 "B) ..."
    pub fn from_prefix(s: &str) -> Option<Self> {
        s.chars().next().and_then(Self::from_char)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceLetter::A => "A",
            ChoiceLetter::B => "B",
            ChoiceLetter::C => "C",
            ChoiceLetter::D => "D",
        }
    }
}

impl fmt::Display for ChoiceLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析得到的选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub choice_letter: ChoiceLetter,
    pub choice_text: String,
    pub is_correct: bool,
}

impl GeneratedAnswer {
    pub fn new(choice_letter: ChoiceLetter, choice_text: impl Into<String>) -> Self {
        Self {
            choice_letter,
            choice_text: choice_text.into(),
            is_correct: false,
        }
    }
}

/// 解析得到的题目，入库后即丢弃
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question_text: String,
    pub answers: Vec<GeneratedAnswer>,
}

impl GeneratedQuestion {
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            answers: Vec::new(),
        }
    }

    /// 标记正确答案：第一个字母相同的选项置为 true，其余全部置为 false
    pub fn mark_correct(&mut self, letter: ChoiceLetter) {
        let mut marked = false;
        for answer in self.answers.iter_mut() {
            answer.is_correct = !marked && answer.choice_letter == letter;
            marked |= answer.is_correct;
        }
    }

    pub fn correct_answer(&self) -> Option<&GeneratedAnswer> {
        self.answers.iter().find(|a| a.is_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_letter_parse() {
        assert_eq!(ChoiceLetter::from_char('C'), Some(ChoiceLetter::C));
        assert_eq!(ChoiceLetter::from_char('E'), None);
        assert_eq!(ChoiceLetter::from_prefix("D) text"), Some(ChoiceLetter::D));
        assert_eq!(ChoiceLetter::from_prefix(""), None);
    }

    #[test]
    fn test_mark_correct_clears_others() {
        let mut question = GeneratedQuestion::new("Q");
        for letter in ChoiceLetter::ALL {
            question.answers.push(GeneratedAnswer::new(letter, letter.as_str()));
        }
        question.mark_correct(ChoiceLetter::A);
        question.mark_correct(ChoiceLetter::C);

        let flagged: Vec<_> = question.answers.iter().filter(|a| a.is_correct).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(question.correct_answer().unwrap().choice_letter, ChoiceLetter::C);
    }

    #[test]
    fn test_mark_correct_duplicate_letter_flags_first_only() {
        let mut question = GeneratedQuestion::new("Q");
        question.answers.push(GeneratedAnswer::new(ChoiceLetter::B, "first"));
        question.answers.push(GeneratedAnswer::new(ChoiceLetter::B, "second"));
        question.mark_correct(ChoiceLetter::B);

        assert!(question.answers[0].is_correct);
        assert!(!question.answers[1].is_correct);
    }
}
