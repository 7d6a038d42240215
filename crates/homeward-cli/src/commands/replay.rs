//! `replay` command: drive a recorded trace through the engine and report
//! decisions, launches, and the diagnostic event stream.

use std::fs;
use std::path::Path;

use homeward_core::{replay, CoreError, Event, RedirectDecision, Signal, Trace};

pub fn run(path: &Path, json: bool) -> Result<(), CoreError> {
    let raw = fs::read_to_string(path)?;
    let trace = Trace::from_json(&raw)?;
    let report = replay(&trace);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for step in &report.steps {
        let decision = match step.decision {
            Some(RedirectDecision::Suppress) => " -> suppress",
            Some(RedirectDecision::Proceed) => " -> proceed",
            None => "",
        };
        println!("{:3}  {}{}", step.index, describe(&step.signal), decision);
    }

    println!();
    if report.launches.is_empty() {
        println!("no home launches");
    } else {
        for destination in &report.launches {
            println!("launched: {destination}");
        }
    }

    println!();
    for event in &report.events {
        println!("event: {}", describe_event(event));
    }

    Ok(())
}

fn describe(signal: &Signal) -> String {
    match signal {
        Signal::GestureEnded {
            token,
            velocity,
            x,
            y,
            ..
        } => format!("gesture_ended token={token} velocity={velocity} vector=({x}, {y})"),
        Signal::RecentsStart { token } => format!("recents_start token={token}"),
        Signal::Settled { token, outcome } => {
            format!("settled token={token} outcome={outcome:?}")
        }
        Signal::Prediction { outcome } => format!("prediction outcome={outcome:?}"),
    }
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::Predicted { outcome, .. } => format!("predicted {outcome:?}"),
        Event::Armed { token, budget, .. } => format!("armed token={token} budget={budget}"),
        Event::BypassConsumed {
            token, remaining, ..
        } => format!("bypass consumed token={token} remaining={remaining}"),
        Event::Redirected { token, .. } => format!("redirected token={token}"),
        Event::HomeLaunched {
            token, destination, ..
        } => format!("home launched token={token} destination={destination}"),
        Event::Cleared { reason, .. } => format!("cleared ({reason})"),
        Event::Settled {
            token,
            bounded_budget,
            ..
        } => format!("settled token={token} budget bounded to {bounded_budget}"),
    }
}
