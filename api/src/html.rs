//! Server-rendered pages for the form flow.
//!
//! Templates are plain `format!` strings. Anything that originated from the
//! user goes through [`html_escape`] first.

use wellcheck_core::{MAX_RISK_SCORE, RiskAssessment, RiskQuestion};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 560px; margin: 60px auto; padding: 0 20px; line-height: 1.5; }
h1 { font-size: 1.5em; }
label { display: block; margin-top: 12px; }
textarea { width: 100%; min-height: 90px; padding: 8px; box-sizing: border-box; font: inherit; }
fieldset { border: 1px solid #ddd; margin-top: 12px; }
button { margin-top: 20px; margin-right: 8px; padding: 10px 24px; background: #111; color: #fff; border: none; cursor: pointer; font-size: 1em; }
.card { background: #f6f6f6; padding: 16px; margin-top: 16px; }
.muted { color: #666; font-size: 0.9em; }
"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>WellCheck · {title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
<p class="muted">WellCheck gives general wellbeing tips, not medical diagnoses.</p>
</body>
</html>"#,
        title = html_escape(title),
    )
}

/// Small form with a single button posting to `action`.
fn next_button(action: &str, label: &str) -> String {
    format!(
        r#"<form method="POST" action="{action}"><button type="submit">{label}</button></form>"#,
        action = html_escape(action),
        label = html_escape(label),
    )
}

fn ask_again_link() -> String {
    next_button("/ask_again", "Continue")
}

pub fn index_page(greeting: &str) -> String {
    let body = format!(
        r#"<h1>{greeting}!</h1>
<p>I'm your WellCheck assistant. I can suggest simple self-care tips for common symptoms or help you gauge how worried you should be.</p>
{start}"#,
        greeting = html_escape(greeting),
        start = next_button("/choose", "Let's start"),
    );
    layout("Welcome", &body)
}

pub fn choose_page() -> String {
    let body = r#"<h1>What would you like to do?</h1>
<form method="POST" action="/choose">
<button type="submit" name="choice" value="advice">Get advice for a symptom</button>
<button type="submit" name="choice" value="risk">Check my risk level</button>
</form>"#;
    layout("Choose", body)
}

pub fn symptom_input_page() -> String {
    let body = r#"<h1>How are you feeling?</h1>
<form method="POST" action="/symptom_input">
<label for="symptom">Describe your symptoms in a few words</label>
<textarea id="symptom" name="symptom" required autofocus placeholder="e.g. sore throat since yesterday"></textarea>
<button type="submit">Get advice</button>
</form>"#;
    layout("Symptoms", body)
}

pub fn advice_page(label: &str, advice: &str) -> String {
    let body = format!(
        r#"<h1>Here's what might help</h1>
<p class="muted">Detected: {label}</p>
<div class="card">{advice}</div>
{next}"#,
        label = html_escape(label),
        advice = html_escape(advice),
        next = ask_again_link(),
    );
    layout("Advice", &body)
}

pub fn risk_input_page() -> String {
    let questions: String = RiskQuestion::ALL
        .into_iter()
        .map(|q| {
            format!(
                r#"<fieldset>
<legend>{prompt}</legend>
<label><input type="radio" name="{field}" value="yes"> Yes</label>
<label><input type="radio" name="{field}" value="no" checked> No</label>
</fieldset>
"#,
                prompt = html_escape(q.prompt()),
                field = q.field(),
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Quick risk check</h1>
<p>Answer five yes/no questions.</p>
<form method="POST" action="/risk_input">
{questions}<button type="submit">See my result</button>
</form>"#
    );
    layout("Risk check", &body)
}

pub fn risk_result_page(assessment: &RiskAssessment) -> String {
    let body = format!(
        r#"<h1>Your result</h1>
<div class="card">{message}</div>
<p class="muted">Score: {score} / {max}</p>
{next}"#,
        message = html_escape(assessment.tier.message()),
        score = assessment.score,
        max = MAX_RISK_SCORE,
        next = ask_again_link(),
    );
    layout("Risk result", &body)
}

const BREATHING_STEPS: [&str; 4] = [
    "Breathe in slowly through your nose for 4 seconds.",
    "Hold your breath for 4 seconds.",
    "Breathe out gently through your mouth for 4 seconds.",
    "Hold again for 4 seconds, then repeat the cycle four times.",
];

pub fn breathing_exercises_page() -> String {
    let steps: String = BREATHING_STEPS
        .iter()
        .map(|step| format!("<li>{}</li>\n", html_escape(step)))
        .collect();

    let body = format!(
        r#"<h1>Let's breathe together</h1>
<p>Sit upright and relax your shoulders. If breathing keeps getting harder, call emergency services.</p>
<ol>
{steps}</ol>
{next}"#,
        next = ask_again_link(),
    );
    layout("Breathing exercises", &body)
}

pub fn ask_again_page() -> String {
    let body = r#"<h1>Is there anything else I can help with?</h1>
<form method="POST" action="/ask_again">
<button type="submit" name="continue_action" value="yes">Yes, something else</button>
<button type="submit" name="continue_action" value="no">No, I'm done</button>
</form>"#;
    layout("Anything else?", body)
}

pub fn thank_you_page() -> String {
    let body = format!(
        r#"<h1>Thank you for checking in 💚</h1>
<p>Take care of yourself. If symptoms get worse, please talk to a healthcare professional.</p>
{restart}"#,
        restart = next_button("/", "Start over"),
    );
    layout("Thank you", &body)
}

#[cfg(test)]
mod tests {
    use wellcheck_core::RiskTier;

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#x27;y&#x27;"
        );
    }

    #[test]
    fn risk_form_has_every_question() {
        let page = risk_input_page();
        for q in RiskQuestion::ALL {
            assert!(page.contains(&format!(r#"name="{}" value="yes""#, q.field())));
        }
    }

    #[test]
    fn risk_result_shows_score() {
        let page = risk_result_page(&RiskAssessment {
            score: 5,
            tier: RiskTier::Moderate,
        });
        assert!(page.contains("Moderate risk"));
        assert!(page.contains("Score: 5 / 10"));
    }

    #[test]
    fn advice_is_escaped() {
        let page = advice_page("unknown", "try 'headache'");
        assert!(page.contains("try &#x27;headache&#x27;"));
    }
}
