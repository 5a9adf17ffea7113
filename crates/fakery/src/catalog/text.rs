//! Lorem-style text generators.

use fake::Fake;
use fake::faker::lorem::raw::{Word, Words};
use fake::locales::EN;
use rand::Rng;

use super::helpers::count;
use crate::binder::Arguments;
use crate::error::CatalogError;
use crate::random::SharedRng;
use crate::registry::{Descriptor, ParamSpec, ParamType, Registry};
use crate::value::Value;

/// Largest accepted `wordcount`.
pub const MAX_WORD_COUNT: usize = 1_000;
/// Largest accepted `sentencecount`.
pub const MAX_SENTENCE_COUNT: usize = 100;
/// Largest accepted `paragraphcount`.
pub const MAX_PARAGRAPH_COUNT: usize = 100;

/// Generates a single word.
pub fn word<R: Rng>(rng: &mut R) -> String {
    Word(EN).fake_with_rng(rng)
}

/// Generates a sentence of exactly `word_count` words.
///
/// The first letter is capitalised and the sentence ends with a full stop.
/// Zero words yield an empty string.
pub fn sentence<R: Rng>(rng: &mut R, word_count: usize) -> String {
    if word_count == 0 {
        return String::new();
    }
    let words: Vec<String> = Words(EN, word_count..word_count.saturating_add(1)).fake_with_rng(rng);
    let joined = words.join(" ");
    let mut chars = joined.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}.", first.to_uppercase(), chars.as_str())
    })
}

/// Generates `paragraph_count` paragraphs of `sentence_count` sentences each.
///
/// Paragraphs are joined with `separator`.
pub fn paragraph<R: Rng>(
    rng: &mut R,
    paragraph_count: usize,
    sentence_count: usize,
    word_count: usize,
    separator: &str,
) -> String {
    (0..paragraph_count)
        .map(|_| {
            (0..sentence_count)
                .map(|_| sentence(rng, word_count))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn sentence_adapter(
    rng: &mut SharedRng<'_>,
    args: &Arguments,
) -> Result<Value, CatalogError> {
    let words = count("wordcount", args.int(0)?, MAX_WORD_COUNT)?;
    Ok(Value::String(sentence(rng, words)))
}

fn paragraph_adapter(
    rng: &mut SharedRng<'_>,
    args: &Arguments,
) -> Result<Value, CatalogError> {
    let paragraphs = count("paragraphcount", args.int(0)?, MAX_PARAGRAPH_COUNT)?;
    let sentences = count("sentencecount", args.int(1)?, MAX_SENTENCE_COUNT)?;
    let words = count("wordcount", args.int(2)?, MAX_WORD_COUNT)?;
    let separator = args.string(3)?;
    Ok(Value::String(paragraph(
        rng, paragraphs, sentences, words, separator,
    )))
}

pub(super) fn register(registry: &mut Registry) {
    registry.register(Descriptor::new(
        "word",
        "text",
        "Random lorem word",
        |rng, _| Ok(Value::String(word(rng))),
    ));
    registry.register(
        Descriptor::new("sentence", "text", "Random lorem sentence", sentence_adapter).param(
            ParamSpec::new("wordcount", ParamType::Int, "Number of words in the sentence")
                .with_default("5"),
        ),
    );
    registry.register(
        Descriptor::new("paragraph", "text", "Random lorem paragraphs", paragraph_adapter)
            .param(
                ParamSpec::new("paragraphcount", ParamType::Int, "Number of paragraphs")
                    .with_default("2"),
            )
            .param(
                ParamSpec::new("sentencecount", ParamType::Int, "Sentences per paragraph")
                    .with_default("2"),
            )
            .param(
                ParamSpec::new("wordcount", ParamType::Int, "Words per sentence").with_default("5"),
            )
            .param(
                ParamSpec::new("paragraphseparator", ParamType::String, "Paragraph separator")
                    .with_default("<br />"),
            ),
    );
}
