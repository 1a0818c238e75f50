//! Server-rendered pages.

use crate::serving::{FeatureField, Prediction};
use maud::{DOCTYPE, Markup, html};

const STYLE: &str = "body{font-family:sans-serif;max-width:42rem;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse}td,th{padding:.25rem .75rem;border-bottom:1px solid #ddd;text-align:left}\
.predicted{font-weight:bold}.error{color:#a00}";

pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (STYLE) }
            }
            body {
                h1 { (title) }
                (body)
                footer {
                    p {
                        a href="/" { "home" } " · "
                        a href="/template_engine" { "features" } " · "
                        a href="/model" { "model" }
                    }
                }
            }
        }
    }
}

pub fn index_page() -> Markup {
    layout(
        "Model server",
        html! {
            p { "A logistic-regression classifier is loaded in memory and ready to predict." }
            ul {
                li { a href="/template_engine" { "Feature list and prediction form" } }
                li { code { "POST /score" } " with " code { r#"{"example": [...]}"# } }
                li { code { "GET /predict?<feature>=<value>&..." } }
                li { a href="/model" { "Model details (JSON)" } }
                li { a href="/schema" { "Score API schema (JSON)" } }
            }
        },
    )
}

pub fn template_engine_page(features: &[FeatureField]) -> Markup {
    layout(
        "Features",
        html! {
            p { "The model expects " (features.len()) " features:" }
            ul {
                @for field in features {
                    @match &field.labels {
                        Some(labels) => {
                            li { code { (field.name) } " one of " (labels.join(", ")) }
                        },
                        None => {
                            li { code { (field.name) } }
                        },
                    }
                }
            }
            h2 { "Predict" }
            form action="/predict" method="get" {
                @for field in features {
                    p {
                        label for=(field.name) { (field.name) " " }
                        @match &field.labels {
                            Some(labels) => {
                                select id=(field.name) name=(field.name) required {
                                    @for label in labels {
                                        option value=(label) { (label) }
                                    }
                                }
                            },
                            None => {
                                input type="text" inputmode="decimal" id=(field.name) name=(field.name) required;
                            },
                        }
                    }
                }
                button type="submit" { "Predict" }
            }
        },
    )
}

pub fn prediction_page(features: &[(String, String)], prediction: &Prediction) -> Markup {
    layout(
        "Prediction",
        html! {
            h2 { "Input" }
            table {
                @for (name, value) in features {
                    tr { th { (name) } td { (value) } }
                }
            }
            h2 { "Class probabilities" }
            table {
                tr { th { "class" } th { "probability" } }
                @for class in &prediction.probabilities {
                    tr class=[(class.label == prediction.label).then_some("predicted")] {
                        td { (class.label) }
                        td { (format!("{:.4}", class.probability)) }
                    }
                }
            }
            p { "Predicted class: " span.predicted { (prediction.label) } }
        },
    )
}

pub fn error_page(title: &str, message: &str) -> Markup {
    layout(
        title,
        html! {
            p.error { (message) }
            p { a href="/template_engine" { "Back to the form" } }
        },
    )
}

pub fn not_found_page(path: &str) -> Markup {
    error_page("Not found", &format!("No page at {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serving::ClassProbability;

    #[test]
    fn template_engine_lists_every_feature() {
        let fields = [
            FeatureField {
                name: "a".into(),
                labels: None,
            },
            FeatureField {
                name: "b<c".into(),
                labels: None,
            },
        ];
        let html = template_engine_page(&fields).into_string();
        assert!(html.contains("<li><code>a</code></li>"));
        assert!(html.contains("b&lt;c"));
        assert!(html.contains("action=\"/predict\""));
        assert!(html.contains("inputmode=\"decimal\""));
    }

    #[test]
    fn nominal_features_get_a_select() {
        let fields = [FeatureField {
            name: "outlook".into(),
            labels: Some(vec!["sunny".into(), "rainy".into()]),
        }];
        let html = template_engine_page(&fields).into_string();
        assert!(html.contains("<li><code>outlook</code> one of sunny, rainy</li>"));
        assert!(html.contains("<select id=\"outlook\" name=\"outlook\" required>"));
        assert!(html.contains("<option value=\"rainy\">rainy</option>"));
        assert!(!html.contains("inputmode"));
    }

    #[test]
    fn prediction_marks_the_winner() {
        let prediction = Prediction {
            label: "yes".into(),
            class_index: 1,
            probabilities: vec![
                ClassProbability {
                    label: "no".into(),
                    probability: 0.25,
                },
                ClassProbability {
                    label: "yes".into(),
                    probability: 0.75,
                },
            ],
        };
        let html = prediction_page(&[("x".into(), "1.5".into())], &prediction).into_string();
        assert!(html.contains("0.7500"));
        assert!(html.contains("<tr class=\"predicted\"><td>yes</td>"));
        assert!(html.contains("<tr><td>no</td>"));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = error_page("Bad request", "<script>").into_string();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
