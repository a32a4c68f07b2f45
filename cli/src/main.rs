//! CLI entrypoint for formsmith
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use formsmith_application::{
    CreateFormInput, CreateFormUseCase, EditFormInput, EditFormUseCase, ImageTarget,
    ListFormsUseCase, ListSubmissionsUseCase, LoadFormUseCase, SubmitFormInput,
    SubmitFormUseCase, UploadImageInput, UploadImageUseCase,
};
use formsmith_domain::question::categorize::{NEW_CATEGORY, NEW_ITEM};
use formsmith_domain::{
    BlankStructure, Form, FormEdit, FormId, Question, QuestionPatch, QuestionType, SubQuestion,
    SubQuestionPatch,
};
use formsmith_infrastructure::{ConfigLoader, ConfiguredUploader, FileConfig, JsonFileFormRepository};
use formsmith_presentation::{
    CategoryAction, Cli, Command, ConsoleFormatter, ItemAction, JsonFormatter, McqAction,
    OutputFormatter,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("Invalid configuration: {}", e))?
    };

    let _log_guard = logging::init(cli.verbose, config.logging.file.as_deref())?;
    config.validate()?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    info!("Using data directory {}", config.storage.data_dir.display());

    // === Dependency Injection ===
    let repository = Arc::new(JsonFileFormRepository::new(&config.storage.data_dir));

    run(command, repository, &config).await
}

async fn run(command: Command, repository: Arc<JsonFileFormRepository>, config: &FileConfig) -> Result<()> {
    let console = ConsoleFormatter;

    match command {
        Command::New { title, question } => {
            let input = question
                .into_iter()
                .fold(CreateFormInput::new(title), |input, kind| input.with_question(kind.into()));
            let output = CreateFormUseCase::new(repository).execute(input).await?;
            println!("Created form {}", output.id);
            print!("{}", console.format_form(&output.id, &output.form));
        }

        Command::Show { id, json } => {
            let id = form_id(&id)?;
            let form = LoadFormUseCase::new(repository).execute(&id).await?;
            print!("{}", formatter(json).format_form(&id, &form));
        }

        Command::List => {
            let forms = ListFormsUseCase::new(repository).execute().await?;
            print!("{}", console.format_form_list(&forms));
        }

        Command::Title { id, title } => {
            let edit = FormEdit::SetTitle { title };
            edit_form(repository, &id, vec![edit]).await?;
            println!("Title updated");
        }

        Command::Add { id, kind, title } => {
            let kind = QuestionType::from(kind);
            let question = match title {
                Some(title) => Question::create(kind, title),
                None => Question::create_default(kind),
            };
            let form = edit_form(repository, &id, vec![FormEdit::AddQuestion { question }]).await?;
            println!("Added {} question {}", kind, form.questions.len());
        }

        Command::Remove { id, question } => {
            let index = question_index(question)?;
            edit_form(repository, &id, vec![FormEdit::RemoveQuestion { index }]).await?;
            println!("Removed question {}", question);
        }

        Command::Patch { id, question, file } => {
            let index = question_index(question)?;
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let patch: QuestionPatch = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a valid question patch", file.display()))?;
            if patch.is_empty() {
                bail!("{} does not change anything", file.display());
            }
            edit_form(repository, &id, vec![FormEdit::UpdateQuestion { index, patch }]).await?;
            println!("Updated question {}", question);
        }

        Command::ClozeText { id, question, text } => {
            let index = question_index(question)?;
            let form = edit_form(repository, &id, vec![FormEdit::SetClozeText { index, text }]).await?;
            print_cloze(&form.questions[index])?;
        }

        Command::Toggle {
            id,
            question,
            tokens,
        } => {
            let index = question_index(question)?;
            let edits = tokens
                .into_iter()
                .map(|token| FormEdit::ToggleBlank { index, token })
                .collect();
            let form = edit_form(repository, &id, edits).await?;
            print_cloze(&form.questions[index])?;
        }

        Command::Tokens { text } => {
            print!(
                "{}",
                ConsoleFormatter::format_token_map(&BlankStructure::derive_from(&text))
            );
        }

        Command::Category {
            id,
            question,
            action,
        } => {
            let index = question_index(question)?;
            let edit = category_edit(index, action)?;
            print_question(edit_form(repository, &id, vec![edit]).await?, index);
        }

        Command::Item {
            id,
            question,
            action,
        } => {
            let index = question_index(question)?;
            let edit = item_edit(index, action)?;
            print_question(edit_form(repository, &id, vec![edit]).await?, index);
        }

        Command::Passage { id, question, text } => {
            let index = question_index(question)?;
            let edit = FormEdit::SetPassage { index, text };
            print_question(edit_form(repository, &id, vec![edit]).await?, index);
        }

        Command::Mcq {
            id,
            question,
            action,
        } => {
            let index = question_index(question)?;
            let edit = mcq_edit(index, action)?;
            print_question(edit_form(repository, &id, vec![edit]).await?, index);
        }

        Command::Submit { id, file } => {
            let id = form_id(&id)?;
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let answers: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;

            let output = SubmitFormUseCase::new(repository)
                .execute(SubmitFormInput::raw(id, answers))
                .await?;
            if !output.violations.is_empty() {
                print!("{}", console.format_violations(&output.violations));
            }
            println!(
                "Recorded submission at {}",
                output.submission.submitted_at.to_rfc3339()
            );
        }

        Command::Submissions { id, json } => {
            let id = form_id(&id)?;
            let report = ListSubmissionsUseCase::new(repository).execute(&id).await?;
            print!("{}", formatter(json).format_submissions(&report));
        }

        Command::Upload { id, file, question } => {
            let id = form_id(&id)?;
            let target = match question {
                Some(number) => ImageTarget::Question(question_index(number)?),
                None => ImageTarget::Header,
            };
            let uploader = Arc::new(ConfiguredUploader::from_config(&config.upload)?);
            let temp_path = stage_upload(&file).await?;

            let url = UploadImageUseCase::new(repository, uploader)
                .execute(UploadImageInput::new(id, temp_path, target))
                .await?;
            println!("{}", url);
        }

        Command::Validate { id } => {
            let id = form_id(&id)?;
            let form = LoadFormUseCase::new(repository).execute(&id).await?;
            let violations = form.validate();
            print!("{}", console.format_violations(&violations));
            let errors = violations.iter().filter(|v| v.is_error()).count();
            if errors > 0 {
                bail!("{} error(s) found", errors);
            }
        }
    }

    Ok(())
}

fn formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(ConsoleFormatter)
    }
}

fn form_id(raw: &str) -> Result<FormId> {
    FormId::new(raw).context("Form id cannot be empty")
}

/// Question numbers on the command line start at 1.
fn question_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .context("Question numbers start at 1")
}

async fn edit_form(
    repository: Arc<JsonFileFormRepository>,
    id: &str,
    edits: Vec<FormEdit>,
) -> Result<Form> {
    let input = EditFormInput::batch(form_id(id)?, edits);
    let output = EditFormUseCase::new(repository).execute(input).await?;
    Ok(output.form)
}

fn category_edit(index: usize, action: CategoryAction) -> Result<FormEdit> {
    Ok(match action {
        CategoryAction::Add { name } => FormEdit::AddCategory {
            index,
            name: name.unwrap_or_else(|| NEW_CATEGORY.to_string()),
        },
        CategoryAction::Rename { category, name } => FormEdit::RenameCategory {
            index,
            category: position(category, "Category")?,
            name,
        },
        CategoryAction::Remove { category } => FormEdit::RemoveCategory {
            index,
            category: position(category, "Category")?,
        },
    })
}

fn item_edit(index: usize, action: ItemAction) -> Result<FormEdit> {
    Ok(match action {
        ItemAction::Add { text } => FormEdit::AddItem {
            index,
            text: text.unwrap_or_else(|| NEW_ITEM.to_string()),
        },
        ItemAction::Rename { item, text } => FormEdit::RenameItem {
            index,
            item: position(item, "Item")?,
            text,
        },
        ItemAction::Remove { item } => FormEdit::RemoveItem {
            index,
            item: position(item, "Item")?,
        },
        ItemAction::Correct { item, category } => FormEdit::SetCorrectCategory {
            index,
            item: position(item, "Item")?,
            category,
        },
    })
}

fn mcq_edit(index: usize, action: McqAction) -> Result<FormEdit> {
    Ok(match action {
        McqAction::Add { text, options } => {
            let placeholder = SubQuestion::placeholder();
            FormEdit::AddSubQuestion {
                index,
                sub_question: SubQuestion::new(
                    text.unwrap_or(placeholder.question),
                    options
                        .as_deref()
                        .map_or(placeholder.options, SubQuestion::parse_options),
                ),
            }
        }
        McqAction::Edit { mcq, text, options } => {
            let patch = SubQuestionPatch {
                question: text,
                options: options.as_deref().map(SubQuestion::parse_options),
                correct_answer: None,
            };
            if patch == SubQuestionPatch::default() {
                bail!("Nothing to change: pass --text or --options");
            }
            FormEdit::UpdateSubQuestion {
                index,
                sub_question: position(mcq, "Multiple-choice question")?,
                patch,
            }
        }
        McqAction::Remove { mcq } => FormEdit::RemoveSubQuestion {
            index,
            sub_question: position(mcq, "Multiple-choice question")?,
        },
        McqAction::Answer { mcq, option } => FormEdit::SetCorrectAnswer {
            index,
            sub_question: position(mcq, "Multiple-choice question")?,
            option,
        },
    })
}

/// Positions inside a question start at 1 on the command line.
fn position(number: usize, what: &str) -> Result<usize> {
    number
        .checked_sub(1)
        .with_context(|| format!("{} numbers start at 1", what))
}

fn print_question(form: Form, index: usize) {
    if let Some(question) = form.questions.get(index) {
        print!("{}", ConsoleFormatter::format_question(index, question));
    }
}

fn print_cloze(question: &Question) -> Result<()> {
    let body = question
        .as_cloze()
        .with_context(|| format!("'{}' is not a cloze question", question.title))?;
    let structure = body.structure();
    print!("{}", ConsoleFormatter::format_token_map(&structure));
    println!();
    println!("{}", ConsoleFormatter::format_cloze_view(&structure));
    Ok(())
}

/// Copy `file` to a fresh temporary path that the upload use case consumes.
///
/// The staged copy keeps the original file name as a suffix so uploaders
/// can derive a stored name from it.
async fn stage_upload(file: &Path) -> Result<PathBuf> {
    let name = file
        .file_name()
        .with_context(|| format!("{} is not a file", file.display()))?;
    let staged = tempfile::Builder::new()
        .prefix("formsmith-")
        .suffix(&format!("-{}", name.to_string_lossy()))
        .tempfile()
        .context("Failed to create a temporary upload file")?
        .into_temp_path()
        .keep()
        .context("Failed to keep the temporary upload file")?;

    if let Err(e) = tokio::fs::copy(file, &staged).await {
        let _ = tokio::fs::remove_file(&staged).await;
        return Err(e).with_context(|| format!("Failed to read {}", file.display()));
    }
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_index_is_one_based() {
        assert_eq!(question_index(1).unwrap(), 0);
        assert_eq!(question_index(3).unwrap(), 2);
        assert!(question_index(0).is_err());
    }

    #[test]
    fn test_form_id_rejects_blank() {
        assert!(form_id("  ").is_err());
        assert_eq!(form_id("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_item_remove_is_one_based() {
        let edit = item_edit(0, ItemAction::Remove { item: 2 }).unwrap();
        assert_eq!(edit, FormEdit::RemoveItem { index: 0, item: 1 });
        assert!(item_edit(0, ItemAction::Remove { item: 0 }).is_err());
    }

    #[test]
    fn test_mcq_add_parses_options() {
        let edit = mcq_edit(
            1,
            McqAction::Add {
                text: None,
                options: Some("Red, Green ,Blue".to_string()),
            },
        )
        .unwrap();
        match edit {
            FormEdit::AddSubQuestion {
                index,
                sub_question,
            } => {
                assert_eq!(index, 1);
                assert_eq!(sub_question.question, "New MCQ Question");
                assert_eq!(sub_question.options, vec!["Red", "Green", "Blue"]);
            }
            other => panic!("unexpected edit: {:?}", other),
        }
    }

    #[test]
    fn test_mcq_edit_requires_a_change() {
        let result = mcq_edit(
            0,
            McqAction::Edit {
                mcq: 1,
                text: None,
                options: None,
            },
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stage_upload_paths_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("cat.png");
        std::fs::write(&original, b"png").unwrap();

        let first = stage_upload(&original).await.unwrap();
        let second = stage_upload(&original).await.unwrap();

        assert_ne!(first, second);
        std::fs::remove_file(first).unwrap();
        std::fs::remove_file(second).unwrap();
    }

    #[tokio::test]
    async fn test_stage_upload_missing_file_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let result = stage_upload(&dir.path().join("missing.png")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stage_upload_copies_and_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("cat.png");
        std::fs::write(&original, b"png").unwrap();

        let staged = stage_upload(&original).await.unwrap();

        assert_ne!(staged, original);
        assert!(staged.to_string_lossy().ends_with("cat.png"));
        assert_eq!(std::fs::read(&staged).unwrap(), b"png");
        assert!(original.exists());
        std::fs::remove_file(staged).unwrap();
    }
}
