//! Prompt templates for caption generation and editing.

use postilion_core::Language;

/// Human-readable language name used inside the prompts.
fn language_name(language: Language) -> &'static str {
    match language {
        Language::Ru => "Russian",
        Language::Kz => "Kazakh",
        Language::En => "English",
    }
}

/// Build the caption-generation prompt for a topic and language.
pub fn caption_prompt(topic: &str, language: Language) -> String {
    format!(
        "You are a professional social media copywriter.\n\
         Write in {language}.\n\
         Create a post of 5-7 sentences.\n\
         Keep the style lively and clear.\n\
         Add 3-6 relevant hashtags.\n\
         Topic:\n{topic}",
        language = language_name(language),
        topic = topic,
    )
}

/// Build the caption-editing prompt from the old caption and the user's
/// instruction. The prompt asks the model to keep the caption's language;
/// this is best-effort, not verified.
pub fn edit_prompt(old_caption: &str, instruction: &str) -> String {
    format!(
        "You are a text editor.\n\
         If asked to rewrite, rewrite completely.\n\
         If asked to change a part, change only that part.\n\
         Keep the language of the text.\n\
         Return only the final text.\n\n\
         TEXT:\n{old}\n\n\
         INSTRUCTION:\n{instruction}",
        old = old_caption,
        instruction = instruction,
    )
}

/// Build the image-generation prompt from the user's description.
pub fn image_prompt(description: &str) -> String {
    format!("High quality social media image, vertical composition, {description}")
}
