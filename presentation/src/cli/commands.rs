//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use formsmith_domain::QuestionType;
use std::path::PathBuf;

/// Question type as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuestionKind {
    /// Sort items into categories
    Categorize,
    /// Fill in the blanks
    Cloze,
    /// Passage with multiple-choice questions
    Comprehension,
}

impl From<QuestionKind> for QuestionType {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Categorize => QuestionType::Categorize,
            QuestionKind::Cloze => QuestionType::Cloze,
            QuestionKind::Comprehension => QuestionType::Comprehension,
        }
    }
}

/// CLI arguments for formsmith
#[derive(Parser, Debug)]
#[command(name = "formsmith")]
#[command(author, version, about = "Build cloze, categorize and comprehension forms")]
#[command(long_about = r#"
formsmith builds questionnaires out of three question types and collects
respondent submissions.

  Categorize     sort items into categories
  Cloze          text with words turned into blanks
  Comprehension  a passage followed by multiple-choice questions

Configuration files are loaded from (in priority order):
1. FORMSMITH_* environment variables
2. --config <path>     Explicit config file
3. ./formsmith.toml    Project-level config
4. ~/.config/formsmith/config.toml   Global config

Example:
  formsmith new "Animals" --question cloze
  formsmith cloze-text <id> 1 "The cat sat on the mat"
  formsmith tokens "The cat sat on the mat"
  formsmith toggle <id> 1 2 10
  formsmith submit <id> answers.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new form
    New {
        /// Form title
        #[arg(default_value = "Untitled Form")]
        title: String,

        /// Seed the form with a placeholder question (repeatable)
        #[arg(short, long, value_enum)]
        question: Vec<QuestionKind>,
    },

    /// Show a form
    Show {
        id: String,

        /// Print the stored JSON document
        #[arg(long)]
        json: bool,
    },

    /// List stored forms
    List,

    /// Set the form title
    Title { id: String, title: String },

    /// Add a question with placeholder content
    Add {
        id: String,

        #[arg(value_enum)]
        kind: QuestionKind,

        /// Question title (defaults to "New <Type> Question")
        #[arg(long)]
        title: Option<String>,
    },

    /// Remove a question; later questions move up
    Remove {
        id: String,
        /// Question number as shown by `show` (starting at 1)
        question: usize,
    },

    /// Merge a JSON patch file into a question
    Patch {
        id: String,
        /// Question number (starting at 1)
        question: usize,
        /// JSON object with any of title, image, categories, items,
        /// correctCategory, text, structure, subQuestions
        file: PathBuf,
    },

    /// Replace the text of a cloze question (clears its blanks)
    ClozeText {
        id: String,
        /// Question number (starting at 1)
        question: usize,
        text: String,
    },

    /// Toggle cloze blanks by token index (see `tokens`)
    Toggle {
        id: String,
        /// Question number (starting at 1)
        question: usize,
        #[arg(required = true)]
        tokens: Vec<usize>,
    },

    /// Show how text splits into tokens
    Tokens { text: String },

    /// Edit the categories of a categorize question
    Category {
        id: String,
        /// Question number (starting at 1)
        question: usize,
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Edit the items of a categorize question
    Item {
        id: String,
        /// Question number (starting at 1)
        question: usize,
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Replace the passage of a comprehension question
    Passage {
        id: String,
        /// Question number (starting at 1)
        question: usize,
        text: String,
    },

    /// Edit the multiple-choice questions under a passage
    Mcq {
        id: String,
        /// Question number (starting at 1)
        question: usize,
        #[command(subcommand)]
        action: McqAction,
    },

    /// Record a submission from a JSON answers file
    Submit {
        id: String,
        /// `{ "<questionIndex>": answer }`
        file: PathBuf,
    },

    /// List collected submissions
    Submissions {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Upload an image for the form header or a question
    Upload {
        id: String,
        /// Image file; a temporary copy is uploaded and then removed
        file: PathBuf,

        /// Attach to this question number instead of the header
        #[arg(long, value_name = "NUMBER")]
        question: Option<usize>,
    },

    /// Report problems that would confuse respondents
    Validate { id: String },
}

/// Category numbers start at 1.
#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// Append a category (defaults to "New Category")
    Add { name: Option<String> },
    /// Rename a category
    Rename { category: usize, name: String },
    /// Remove a category; items keep their correct-category entries
    Remove { category: usize },
}

/// Item numbers start at 1.
#[derive(Subcommand, Debug)]
pub enum ItemAction {
    /// Append an item (defaults to "New Item")
    Add { text: Option<String> },
    /// Rename an item
    Rename { item: usize, text: String },
    /// Remove an item and the correct category recorded for its text
    Remove { item: usize },
    /// Set the correct category of an item; omit the category to clear it
    Correct { item: usize, category: Option<String> },
}

/// Multiple-choice question numbers start at 1.
#[derive(Subcommand, Debug)]
pub enum McqAction {
    /// Append a multiple-choice question
    Add {
        /// Question text (defaults to "New MCQ Question")
        #[arg(long)]
        text: Option<String>,
        /// Comma-separated options, e.g. "Red, Green, Blue"
        #[arg(long)]
        options: Option<String>,
    },
    /// Change the text or options of a multiple-choice question
    Edit {
        mcq: usize,
        #[arg(long)]
        text: Option<String>,
        /// Comma-separated options; replaces all current options
        #[arg(long)]
        options: Option<String>,
    },
    /// Remove a multiple-choice question; later ones move up
    Remove { mcq: usize },
    /// Record the correct option
    Answer { mcq: usize, option: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_toggle() {
        let cli = Cli::parse_from(["formsmith", "-vv", "toggle", "abc", "1", "2", "4"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Toggle {
                id,
                question,
                tokens,
            }) => {
                assert_eq!(id, "abc");
                assert_eq!(question, 1);
                assert_eq!(tokens, vec![2, 4]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_new_with_questions() {
        let cli = Cli::parse_from(["formsmith", "new", "Quiz", "-q", "cloze", "-q", "categorize"]);
        match cli.command {
            Some(Command::New { title, question }) => {
                assert_eq!(title, "Quiz");
                let kinds: Vec<QuestionType> = question.into_iter().map(Into::into).collect();
                assert_eq!(kinds, vec![QuestionType::Cloze, QuestionType::Categorize]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_item_correct_without_category() {
        let cli = Cli::parse_from(["formsmith", "item", "abc", "1", "correct", "2"]);
        match cli.command {
            Some(Command::Item {
                question,
                action: ItemAction::Correct { item, category },
                ..
            }) => {
                assert_eq!(question, 1);
                assert_eq!(item, 2);
                assert!(category.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_mcq_add_options() {
        let cli = Cli::parse_from([
            "formsmith", "mcq", "abc", "2", "add", "--text", "Colour?", "--options", "Red, Blue",
        ]);
        match cli.command {
            Some(Command::Mcq {
                action: McqAction::Add { text, options },
                ..
            }) => {
                assert_eq!(text.as_deref(), Some("Colour?"));
                assert_eq!(options.as_deref(), Some("Red, Blue"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_upload_question_target() {
        let cli = Cli::parse_from(["formsmith", "upload", "abc", "cat.png", "--question", "1"]);
        assert!(matches!(
            cli.command,
            Some(Command::Upload { question: Some(1), .. })
        ));
    }
}
