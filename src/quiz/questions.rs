use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    fn new(text: &str, options: [&str; OPTION_COUNT], correct: usize, explanation: &str) -> Self {
        Question {
            text: text.to_owned(),
            options: options.map(str::to_owned),
            correct,
            explanation: explanation.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(rename = "question")]
    questions: Vec<Question>,
}

/// Reads a question set from a TOML file made of `[[question]]` tables.
/// The set is checked when it is handed to `QuizEngine::new`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Question>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    let file: QuestionFile = toml::from_str(&contents).map_err(|source| Error::Toml {
        path: path.to_owned(),
        source,
    })?;

    Ok(file.questions)
}

pub fn validate(questions: &[Question]) -> Result<()> {
    if questions.is_empty() {
        return Err(Error::InvalidQuiz("no questions".to_owned()));
    }

    for (i, question) in questions.iter().enumerate() {
        if question.correct >= OPTION_COUNT {
            return Err(Error::InvalidQuiz(format!(
                "question {} marks option {} as correct, only {} options exist",
                i + 1,
                question.correct,
                OPTION_COUNT
            )));
        }
        if question.text.trim().is_empty() {
            return Err(Error::InvalidQuiz(format!("question {} has no text", i + 1)));
        }
    }

    Ok(())
}

pub fn builtin() -> Vec<Question> {
    vec![
        Question::new(
            "Сколько радиан в полном круге?",
            ["π радиан", "2π радиан", "3π радиан", "4π радиан"],
            1,
            "Полный круг составляет 2π радиан (360 градусов).",
        ),
        Question::new(
            "Чему равен 1 радиан в градусах?",
            ["45°", "57.3°", "60°", "90°"],
            1,
            "1 радиан ≈ 57.3° (180°/π)",
        ),
        Question::new(
            "Сколько градусов в π/2 радиан?",
            ["45°", "60°", "90°", "180°"],
            2,
            "π/2 радиан = 90° (четверть круга)",
        ),
        Question::new(
            "Какой угол соответствует π/6 радиан?",
            ["20°", "30°", "45°", "60°"],
            1,
            "π/6 радиан = 30° (π/6 × 180°/π = 30°)",
        ),
        Question::new(
            "Чему равен угол π/4 радиан?",
            ["30°", "45°", "60°", "90°"],
            1,
            "π/4 радиан = 45° (восьмая часть круга)",
        ),
        Question::new(
            "Сколько радиан в 180 градусах?",
            ["π/2", "π", "3π/2", "2π"],
            1,
            "180° = π радиан (половина круга)",
        ),
        Question::new(
            "Какой угол в радианах соответствует 270 градусам?",
            ["π", "3π/2", "2π", "5π/3"],
            1,
            "270° = 3π/2 радиан (три четверти круга)",
        ),
        Question::new(
            "Чему равен угол 2π/3 радиан в градусах?",
            ["90°", "120°", "150°", "180°"],
            1,
            "2π/3 радиан = 120° (треть круга)",
        ),
        Question::new(
            "Сколько градусов в 5π/6 радиан?",
            ["120°", "150°", "160°", "175°"],
            1,
            "5π/6 радиан = 150° (5/6 от 180°)",
        ),
        Question::new(
            "Какой угол больше: π/3 радиан или 50 градусов?",
            ["π/3 радиан", "50 градусов", "Они равны", "Зависит от квадранта"],
            0,
            "π/3 радиан = 60°, что больше чем 50°",
        ),
        Question::new(
            "Сколько радиан в 45 градусах?",
            ["π/6", "π/4", "π/3", "π/2"],
            1,
            "45° = π/4 радиан (восьмая часть круга)",
        ),
        Question::new(
            "Какой угол меньше: 2π/3 радиан или 100 градусов?",
            ["2π/3 радиан", "100 градусов", "Они равны", "Зависит от направления"],
            1,
            "2π/3 радиан = 120°, что больше чем 100°",
        ),
        Question::new(
            "Чему равен угол 3π/4 радиан в градусах?",
            ["115°", "125°", "135°", "145°"],
            2,
            "3π/4 радиан = 135° (три восьмых круга)",
        ),
        Question::new(
            "Сколько радиан в 240 градусах?",
            ["4π/3", "3π/2", "5π/3", "7π/6"],
            0,
            "240° = 4π/3 радиан (две трети круга)",
        ),
        Question::new(
            "Какой угол соответствует 5π/4 радиан?",
            ["205°", "215°", "225°", "235°"],
            2,
            "5π/4 радиан = 225° (пять восьмых круга)",
        ),
        Question::new(
            "Сколько градусов в π/12 радиан?",
            ["15°", "20°", "25°", "30°"],
            0,
            "π/12 радиан = 15° (одна двенадцатая круга)",
        ),
        Question::new(
            "Чему равен угол 7π/6 радиан в градусах?",
            ["190°", "200°", "210°", "220°"],
            2,
            "7π/6 радиан = 210° (семь шестых круга)",
        ),
        Question::new(
            "Сколько радиан в 300 градусах?",
            ["5π/3", "7π/4", "11π/6", "23π/12"],
            0,
            "300° = 5π/3 радиан (пять третей круга)",
        ),
        Question::new(
            "Какой угол соответствует 11π/6 радиан?",
            ["315°", "320°", "330°", "340°"],
            2,
            "11π/6 радиан = 330° (одиннадцать шестых круга)",
        ),
        Question::new(
            "В каких единицах измеряется длина дуги окружности единичного радиуса?",
            ["В радианах", "В градусах", "В метрах", "В радианах и градусах"],
            0,
            "Длина дуги окружности единичного радиуса численно равна углу в радианах",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_is_valid() {
        let questions = builtin();
        assert_eq!(questions.len(), 20);
        assert!(validate(&questions).is_ok());
        assert_eq!(questions[0].correct, 1);
        assert_eq!(questions[0].options[1], "2π радиан");
    }

    #[test]
    fn parses_question_file() {
        let file: QuestionFile = toml::from_str(
            r#"
            [[question]]
            text = "Сколько градусов в π радиан?"
            options = ["90°", "180°", "270°", "360°"]
            correct = 1

            [[question]]
            text = "2π?"
            options = ["a", "b", "c", "d"]
            correct = 3
            explanation = "полный круг"
            "#,
        )
        .unwrap();

        assert_eq!(file.questions.len(), 2);
        assert_eq!(file.questions[0].explanation, "");
        assert_eq!(file.questions[1].correct, 3);
        assert!(validate(&file.questions).is_ok());
    }

    #[test]
    fn wrong_option_count_does_not_parse() {
        let result: std::result::Result<QuestionFile, _> = toml::from_str(
            r#"
            [[question]]
            text = "?"
            options = ["a", "b", "c"]
            correct = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let mut questions = builtin();
        questions[3].correct = 4;
        assert!(matches!(validate(&questions), Err(Error::InvalidQuiz(_))));
    }

    #[test]
    fn rejects_empty_set() {
        assert!(matches!(validate(&[]), Err(Error::InvalidQuiz(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load("no/such/questions.toml"),
            Err(Error::Io { .. })
        ));
    }
}
