//! 模型输出解析 - 业务能力层
//!
//! 把模型返回的半结构化文本逐行解析为题目列表。
//!
//! 解析是宽松的：
//! - 空行跳过
//! - 不认识的行直接丢弃（模型常在题目前后附带寒暄）
//! - 缺少 `Answer:` 行的题目保留，所有选项都不是正确答案
//! - 没有任何选项的题目同样保留
//!
//! 解析过程是一个两状态的状态机：`Idle`（没有打开的题目）和 `Open`（正在收集选项）。
//! 输入结束时必须显式调用 `finish` 把最后一道题提交到结果中。

use regex::Regex;
use tracing::debug;

use crate::models::{ChoiceLetter, GeneratedAnswer, GeneratedQuestion};

/// 一行文本的分类
#[derive(Debug, PartialEq, Eq)]
enum Line {
    /// `**1. 题干**`
    Question(String),
    /// 单个选项，或同一行里的 A-D 四个选项
    Choices(Vec<GeneratedAnswer>),
    /// `Answer: B`
    Answer(ChoiceLetter),
    Other,
}

/// 解析状态
#[derive(Debug)]
enum ParseState {
    Idle,
    Open(GeneratedQuestion),
}

impl ParseState {
    /// 处理一行，返回新状态
    fn step(self, line: Line, out: &mut Vec<GeneratedQuestion>) -> ParseState {
        match (self, line) {
            (state, Line::Question(text)) => {
                state.finish(out);
                ParseState::Open(GeneratedQuestion::new(text))
            }
            (ParseState::Open(mut question), Line::Choices(answers)) => {
                question.answers.extend(answers);
                ParseState::Open(question)
            }
            (ParseState::Open(mut question), Line::Answer(letter)) => {
                question.mark_correct(letter);
                ParseState::Open(question)
            }
            // 题目之外的选项和答案行，以及无法识别的行
            (state, _) => state,
        }
    }

    /// 结束当前题目（如果有）并追加到结果
    fn finish(self, out: &mut Vec<GeneratedQuestion>) {
        if let ParseState::Open(question) = self {
            out.push(question);
        }
    }
}

/// 模型输出解析器
pub struct ResponseParser {
    question_re: Regex,
    choice_re: Regex,
    marker_re: Regex,
    answer_re: Regex,
}

impl ResponseParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            question_re: Regex::new(r"^\*\*\d+\.\s*(.+?)\*\*")?,
            choice_re: Regex::new(r"^([A-D])\)\s*(.+)")?,
            marker_re: Regex::new(r"\b([A-D])\s*\)")?,
            answer_re: Regex::new(r"^Answer:\s*([A-D])")?,
        })
    }

    /// 解析模型输出，永不失败
    pub fn parse(&self, raw_text: &str) -> Vec<GeneratedQuestion> {
        let mut questions = Vec::new();
        let mut state = ParseState::Idle;

        for line in raw_text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            state = state.step(self.classify(line), &mut questions);
        }
        state.finish(&mut questions);

        debug!("解析得到 {} 道题目", questions.len());
        questions
    }

    fn classify(&self, line: &str) -> Line {
        if let Some(caps) = self.question_re.captures(line) {
            return Line::Question(caps[1].trim().to_string());
        }

        // 四个选项挤在同一行的情况要先于单选项判断，否则整行会被当成选项 A
        if let Some(answers) = self.split_collapsed_choices(line) {
            return Line::Choices(answers);
        }

        if let Some(caps) = self.choice_re.captures(line) {
            if let Some(letter) = ChoiceLetter::from_prefix(&caps[1]) {
                return Line::Choices(vec![GeneratedAnswer::new(letter, caps[2].trim())]);
            }
        }

        if let Some(caps) = self.answer_re.captures(line) {
            if let Some(letter) = ChoiceLetter::from_prefix(&caps[1]) {
                return Line::Answer(letter);
            }
        }

        Line::Other
    }

    /// 拆分 `A) x B) y C) z D) w` 形式的行
    ///
    /// 只接受按 A、B、C、D 顺序出现的标记；每个选项的文本截止到下一个标记或行尾。
    fn split_collapsed_choices(&self, line: &str) -> Option<Vec<GeneratedAnswer>> {
        // (字母, 标记起点, 文本起点)
        let mut markers: Vec<(ChoiceLetter, usize, usize)> = Vec::with_capacity(4);

        for caps in self.marker_re.captures_iter(line) {
            let Some(expected) = ChoiceLetter::ALL.get(markers.len()) else {
                break;
            };
            let (Some(letter_match), Some(whole)) = (caps.get(1), caps.get(0)) else {
                continue;
            };
            if ChoiceLetter::from_prefix(letter_match.as_str()) == Some(*expected) {
                markers.push((*expected, letter_match.start(), whole.end()));
            }
        }

        if markers.len() < ChoiceLetter::ALL.len() {
            return None;
        }

        let answers = markers
            .iter()
            .enumerate()
            .map(|(i, &(letter, _, text_start))| {
                let text_end = markers.get(i + 1).map_or(line.len(), |next| next.1);
                GeneratedAnswer::new(letter, line[text_start..text_end].trim())
            })
            .collect();

        Some(answers)
    }
}
