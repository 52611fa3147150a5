//! Integration tests for the submit → dispatch → render lifecycle.
//!
//! Exercises: Controller::submit, Exchange::run, Controller::on_reply,
//! Controller::change_language against a scripted dispatcher.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::ScriptedDispatcher;
use medibot_core::controller::{Controller, ExchangeState};
use medibot_core::error::TransportError;
use medibot_core::locale::{Language, LocalizationTable};
use medibot_core::types::{Sender, Turn};

fn controller_with(dispatcher: &Arc<ScriptedDispatcher>, language: Language) -> Controller {
    Controller::new(
        LocalizationTable::builtin(),
        Arc::clone(dispatcher) as Arc<dyn medibot_core::dispatcher::Dispatcher>,
        "user_test12345",
        language,
    )
}

/// Submits `text`, runs the exchange, and applies the outcome in `reply_language`.
async fn round_trip(controller: &mut Controller, text: &str, submit: Language, reply: Language) {
    let exchange = controller.submit(text, submit).expect("submission accepted");
    let outcome = exchange.run().await;
    controller.on_reply(outcome, reply);
}

#[tokio::test]
async fn blank_submissions_are_ignored() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    let mut controller = controller_with(&dispatcher, Language::En);
    let before = controller.transcript().turns().to_vec();

    for text in ["", "   ", "\t\n"] {
        assert!(controller.submit(text, Language::En).is_none());
    }

    assert_eq!(controller.transcript().turns(), before.as_slice());
    assert_eq!(controller.transcript().pending(), None);
    assert_eq!(controller.state(), ExchangeState::Idle);
    assert!(dispatcher.recorded().is_empty());
}

#[tokio::test]
async fn question_reply_appends_user_and_assistant_turns() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(r#"{"type":"question","message":"How long have you had the fever?"}"#);
    let mut controller = controller_with(&dispatcher, Language::En);
    let before = controller.transcript().turns().len();

    round_trip(&mut controller, "  I have a fever ", Language::En, Language::En).await;

    let turns = controller.transcript().turns();
    assert_eq!(turns.len(), before + 2);
    assert_eq!(turns[before], Turn::user("I have a fever"));
    let last = turns.last().unwrap();
    assert_eq!(last.sender, Sender::Assistant);
    assert_eq!(last.body, "How long have you had the fever?");
    assert!(last.attachment.is_none());
    assert_eq!(controller.transcript().pending(), None);
    assert_eq!(controller.state(), ExchangeState::Idle);

    let sent = dispatcher.recorded();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "I have a fever");
    assert_eq!(sent[0].language, "en");
    assert_eq!(sent[0].user_id, "user_test12345");
}

#[tokio::test]
async fn pending_indicator_shows_localized_thinking_text_while_awaiting() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(r#"{"type":"question","message":"?"}"#);
    let mut controller = controller_with(&dispatcher, Language::Hi);
    let table = LocalizationTable::builtin();

    let exchange = controller.submit("बुखार", Language::Hi).unwrap();
    assert_eq!(controller.state(), ExchangeState::AwaitingReply);
    assert_eq!(controller.transcript().pending(), Some(table.entry(Language::Hi).thinking.as_str()));

    controller.on_reply(exchange.run().await, Language::Hi);
    assert_eq!(controller.transcript().pending(), None);
}

#[tokio::test]
async fn submissions_while_awaiting_reply_are_ignored() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(r#"{"type":"question","message":"Where does it hurt?"}"#);
    let mut controller = controller_with(&dispatcher, Language::En);

    let exchange = controller.submit("pain", Language::En).unwrap();
    let turns_while_waiting = controller.transcript().turns().len();
    assert!(controller.submit("more pain", Language::En).is_none());
    assert_eq!(controller.transcript().turns().len(), turns_while_waiting);

    controller.on_reply(exchange.run().await, Language::En);
    assert_eq!(dispatcher.recorded().len(), 1);
    assert_eq!(controller.transcript().turns().last().unwrap().body, "Where does it hurt?");
}

#[tokio::test]
async fn marathi_diagnosis_renders_localized_match_card() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(
        r#"{"type":"diagnosis","message":"Please consult a specialist","action":"video_call",
            "specialty":"Cardiology",
            "doctor":{"name":"Dr. A","specialty":"Cardiology","experience":"10 yrs","meet_link":"https://x"}}"#,
    );
    let mut controller = controller_with(&dispatcher, Language::Mr);
    let table = LocalizationTable::builtin();

    round_trip(&mut controller, "chest pain", Language::Mr, Language::Mr).await;

    let turns = controller.transcript().turns();
    let message = &turns[turns.len() - 2];
    assert_eq!(message.body, "Please consult a specialist");
    assert!(message.attachment.is_none());

    let card = turns.last().unwrap().attachment.as_ref().expect("match card");
    assert_eq!(card.specialty_label, table.resolve_specialty(Language::Mr, "Cardiology"));
    assert_eq!(card.specialty_label, "हृदयरोग तज्ञ (Cardiologist)");
    assert_ne!(card.specialty_label, "Cardiology");
    assert_eq!(card.doctor_name, "Dr. A");
    assert_eq!(card.experience, "10 yrs");
    assert_eq!(card.meet_link, "https://x");
    assert_eq!(card.heading, table.entry(Language::Mr).match_found);
}

#[tokio::test]
async fn diagnosis_without_provider_appends_no_doctor_notice() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(r#"{"type":"diagnosis","message":"Diagnosis complete.","specialty":"Dentistry"}"#);
    let mut controller = controller_with(&dispatcher, Language::Hi);
    let table = LocalizationTable::builtin();

    round_trip(&mut controller, "दांत दर्द", Language::Hi, Language::Hi).await;

    let turns = controller.transcript().turns();
    assert_eq!(turns[turns.len() - 2].body, "Diagnosis complete.");
    let notice = turns.last().unwrap();
    assert_eq!(notice.body, table.entry(Language::Hi).no_doc);
    assert!(notice.attachment.is_none());
    assert!(controller.transcript().latest_match_card().is_none());
}

#[tokio::test]
async fn provider_without_video_call_action_is_not_carded() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(
        r#"{"type":"diagnosis","message":"Visit a clinic.","action":"schedule_visit",
            "doctor":{"name":"Dr. E","specialty":"Orthopedics","experience":"5 yrs","meet_link":"https://e"}}"#,
    );
    let mut controller = controller_with(&dispatcher, Language::En);

    round_trip(&mut controller, "knee", Language::En, Language::En).await;

    assert!(controller.transcript().latest_match_card().is_none());
    assert_eq!(
        controller.transcript().turns().last().unwrap().body,
        LocalizationTable::builtin().entry(Language::En).no_doc
    );
}

#[tokio::test]
async fn transport_failure_appends_one_error_turn_and_recovers() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_error(TransportError::Timeout(Duration::from_secs(30)));
    dispatcher.queue_json(r#"{"type":"question","message":"Any fever?"}"#);
    let mut controller = controller_with(&dispatcher, Language::En);
    let table = LocalizationTable::builtin();
    let before = controller.transcript().turns().len();

    round_trip(&mut controller, "cough", Language::En, Language::En).await;

    let turns = controller.transcript().turns();
    assert_eq!(turns.len(), before + 2);
    assert_eq!(turns.last().unwrap().body, table.entry(Language::En).error);
    assert_eq!(controller.transcript().pending(), None);
    assert_eq!(controller.state(), ExchangeState::Idle);

    round_trip(&mut controller, "cough again", Language::En, Language::En).await;
    assert_eq!(controller.transcript().turns().last().unwrap().body, "Any fever?");
}

#[tokio::test]
async fn unrecognized_reply_renders_nothing() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(r#"{"type":"typing","message":"..."}"#);
    let mut controller = controller_with(&dispatcher, Language::En);
    let before = controller.transcript().turns().len();

    round_trip(&mut controller, "hello", Language::En, Language::En).await;

    assert_eq!(controller.transcript().turns().len(), before + 1);
    assert_eq!(controller.transcript().turns().last().unwrap().sender, Sender::User);
    assert_eq!(controller.transcript().pending(), None);
    assert_eq!(controller.state(), ExchangeState::Idle);
}

#[tokio::test]
async fn reply_is_localized_with_language_selected_at_reply_time() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(
        r#"{"type":"diagnosis","message":"See a neurologist","action":"video_call","specialty":"Neurology",
            "doctor":{"name":"Dr. N","specialty":"Neurology","experience":"8 yrs","meet_link":"https://n"}}"#,
    );
    let mut controller = controller_with(&dispatcher, Language::En);
    let table = LocalizationTable::builtin();

    round_trip(&mut controller, "migraine", Language::En, Language::Hi).await;

    assert_eq!(dispatcher.recorded()[0].language, "en");
    let card = controller.transcript().latest_match_card().unwrap();
    assert_eq!(card.specialty_label, table.resolve_specialty(Language::Hi, "Neurology"));
    assert_eq!(card.join_label, table.entry(Language::Hi).join_btn);
}

#[tokio::test]
async fn enveloped_card_label_follows_the_client_table() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(
        r#"{"type":"diagnosis","message":"Diagnosis complete.",
            "data":{"specialty":"Gastroenterology","specialty_translated":"गैस्ट्रो",
                    "doctor":{"name":"Dr. G","specialty":"GI","experience":"5 yrs","meet_link":"https://g"},
                    "recommended_action":"video_call"}}"#,
    );
    dispatcher.queue_json(
        r#"{"type":"diagnosis","message":"Diagnosis complete.",
            "data":{"specialty":"Cardiology","specialty_translated":"कार्डियो",
                    "doctor":{"name":"Dr. H","specialty":"Heart","experience":"9 yrs","meet_link":"https://h"},
                    "recommended_action":"video_call"}}"#,
    );
    let mut controller = controller_with(&dispatcher, Language::Hi);
    let table = LocalizationTable::builtin();

    round_trip(&mut controller, "stomach ache", Language::Hi, Language::Hi).await;
    let card = controller.transcript().latest_match_card().unwrap();
    assert_eq!(card.specialty_label, table.resolve_specialty(Language::Hi, "Gastroenterology"));
    assert_eq!(card.specialty_label, "Gastroenterology");

    round_trip(&mut controller, "chest pain", Language::Hi, Language::Hi).await;
    let card = controller.transcript().latest_match_card().unwrap();
    assert_eq!(card.specialty_label, table.resolve_specialty(Language::Hi, "Cardiology"));
    assert_eq!(card.specialty_label, "हृदयरोग विशेषज्ञ (Cardiology)");
}

#[tokio::test]
async fn language_change_relocalizes_greeting_only() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(r#"{"type":"question","message":"How old are you?"}"#);
    let mut controller = controller_with(&dispatcher, Language::En);
    let table = LocalizationTable::builtin();

    round_trip(&mut controller, "rash", Language::En, Language::En).await;
    controller.change_language(Language::Mr);

    let turns = controller.transcript().turns();
    assert_eq!(turns[0].body, table.entry(Language::Mr).greeting);
    assert_eq!(turns[1].body, "rash");
    assert_eq!(turns[2].body, "How old are you?");
}

#[tokio::test]
async fn language_change_while_awaiting_keeps_the_exchange_alive() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    dispatcher.queue_json(r#"{"type":"question","message":"Since when?"}"#);
    let mut controller = controller_with(&dispatcher, Language::En);

    let exchange = controller.submit("itching", Language::En).unwrap();
    controller.change_language(Language::Hi);
    assert_eq!(controller.state(), ExchangeState::AwaitingReply);
    assert!(controller.transcript().pending().is_some());

    controller.on_reply(exchange.run().await, Language::Hi);
    assert_eq!(controller.state(), ExchangeState::Idle);
    assert_eq!(controller.transcript().turns().last().unwrap().body, "Since when?");
}

#[tokio::test]
async fn stray_reply_while_idle_is_dropped() {
    let dispatcher = Arc::new(ScriptedDispatcher::new());
    let mut controller = controller_with(&dispatcher, Language::En);
    let before = controller.transcript().turns().len();

    controller.on_reply(Err(TransportError::Timeout(Duration::from_secs(1))), Language::En);

    assert_eq!(controller.transcript().turns().len(), before);
}
