use crate::symptoms::SymptomTag;

/// Shown when a caller asks for advice on something that is not a known tag.
pub const NO_ADVICE_FOUND: &str = "❓ I couldn't find advice for that symptom.";

/// Canned advice for a symptom tag. Total over [`SymptomTag`].
pub fn lookup_advice(tag: SymptomTag) -> &'static str {
    match tag {
        SymptomTag::Cough => {
            "💡 Drink warm fluids, rest, and avoid cold air. If it lasts more than 5 days, consult a doctor."
        }
        SymptomTag::Headache => "💡 Rest in a quiet room, drink water, and avoid screen time.",
        SymptomTag::Fever => {
            "💡 Stay hydrated, rest, and monitor your temperature. See a doctor if it gets too high."
        }
        SymptomTag::Stomachache => {
            "💡 Eat light food, avoid greasy snacks. If pain is severe, visit a clinic."
        }
        SymptomTag::Tiredness => {
            "💡 Sleep well, eat nutritious food, and take short breaks during the day."
        }
        SymptomTag::MusclePain => {
            "💡 Try gentle stretching, rest the area, and apply a warm compress."
        }
        SymptomTag::BreathingDifficulty => {
            "💡 Stay calm, sit upright, and use an inhaler if prescribed. Seek emergency help if it worsens."
        }
        SymptomTag::MuscleCramps => {
            "💡 For muscle cramps, try stretching, applying a warm compress, or gentle massage."
        }
        SymptomTag::Cramps => {
            "💡 Are you on your period? If so, try using a heat pack on your lower abdomen."
        }
        SymptomTag::Unknown => {
            "❓ Hmm, I couldn't understand that. Try mentioning a common symptom like 'headache' or 'fever'."
        }
    }
}

/// String-keyed lookup for callers holding a tag name rather than a
/// [`SymptomTag`]. `None` when the name does not parse.
pub fn lookup_advice_by_name(name: &str) -> Option<(SymptomTag, &'static str)> {
    let tag = name.parse::<SymptomTag>().ok()?;
    Some((tag, lookup_advice(tag)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::symptoms::classify_symptom;

    #[test]
    fn every_tag_has_non_empty_advice() {
        for tag in SymptomTag::ALL {
            assert!(!lookup_advice(tag).trim().is_empty(), "{tag}");
        }
    }

    #[test]
    fn advice_texts_are_distinct() {
        let texts: HashSet<_> = SymptomTag::ALL.into_iter().map(lookup_advice).collect();
        assert_eq!(texts.len(), SymptomTag::ALL.len());
    }

    #[test]
    fn unmatched_text_gets_unknown_advice() {
        let advice = lookup_advice(classify_symptom("purple spots"));
        assert!(advice.starts_with("❓ Hmm, I couldn't understand that."));
    }

    #[test]
    fn lookup_by_name_accepts_both_spellings() {
        let (tag, advice) = lookup_advice_by_name("muscle_pain").unwrap();
        assert_eq!(tag, SymptomTag::MusclePain);
        assert_eq!(advice, lookup_advice(SymptomTag::MusclePain));
        assert!(lookup_advice_by_name("muscle pain").is_some());
        assert!(lookup_advice_by_name("rash").is_none());
    }
}
