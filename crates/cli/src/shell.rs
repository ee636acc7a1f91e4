//! Interactive session.
//!
//! Reads commands from stdin while delayed work (analyses, chat replies, treatment plans)
//! completes in spawned tasks. Completions come back over a channel and are applied to the
//! [`Session`] on the shell's own task, so the session is never shared.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use healthai_core::chat::ChatReply;
use healthai_core::matcher::ScoredCondition;
use healthai_core::{
    analyse, plan_for, respond, views, AnalysisRequest, AnalysisTicket, Catalogue, CoreConfig,
    Module, Session, TreatmentPlanView,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::render;

const HELP: &str = "\
Commands:
  open <module>        switch module (dashboard, chat, prediction, treatment, analytics,
                       profile, appointments, medications)
  view                 show the current module again
  select <symptom>     tick a checklist symptom
  clear                untick all symptoms
  age <value>          set age for the next analysis
  gender <value>       set gender for the next analysis
  analyse [text]       analyse ticked symptoms plus optional text
  chat <message>       talk to the assistant
  treat <condition>    show a treatment plan
  theme                toggle light/dark theme
  help                 show this help
  quit                 leave the shell";

/// Work finished by a spawned task.
#[derive(Debug)]
pub enum Completion {
    Analysis {
        ticket: AnalysisTicket,
        results: Vec<ScoredCondition>,
    },
    Reply(ChatReply),
    Treatment(TreatmentPlanView),
}

/// What the read loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue(Option<String>),
    Quit,
}

pub struct Shell {
    cfg: CoreConfig,
    catalogue: Arc<Catalogue>,
    session: Session,
    selected: Vec<String>,
    age: Option<String>,
    gender: Option<String>,
    tx: mpsc::UnboundedSender<Completion>,
}

impl Shell {
    pub fn new(
        cfg: CoreConfig,
        catalogue: Arc<Catalogue>,
        session: Session,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let shell = Self {
            cfg,
            catalogue,
            session,
            selected: Vec::new(),
            age: None,
            gender: None,
            tx,
        };
        (shell, rx)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn render_current(&self) -> String {
        render::view(&views::render(&self.session, &self.catalogue))
    }

    /// Handle one line of input. Must be called from within a tokio runtime.
    pub fn handle_line(&mut self, line: &str) -> Step {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let output = match command.to_ascii_lowercase().as_str() {
            "" => None,
            "quit" | "exit" => return Step::Quit,
            "help" => Some(HELP.to_string()),
            "view" => Some(self.render_current()),
            "open" => match self.session.switch_module_named(rest) {
                Ok(_) => Some(self.render_current()),
                Err(e) => Some(e.to_string()),
            },
            "theme" => Some(format!("Theme: {}", self.session.toggle_theme().as_str())),
            "select" => Some(self.select(rest)),
            "clear" => {
                self.selected.clear();
                Some("Checklist cleared.".to_string())
            }
            "age" => {
                self.age = Some(rest.to_string());
                None
            }
            "gender" => {
                self.gender = Some(rest.to_string());
                None
            }
            "analyse" | "analyze" => Some(self.start_analysis(rest)),
            "chat" => self.send_chat(rest),
            "treat" => Some(self.start_treatment(rest)),
            other => Some(format!("Unknown command '{other}'. Type 'help' for a list.")),
        };
        Step::Continue(output)
    }

    fn select(&mut self, label: &str) -> String {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return render::checklist(&views::checklist(&self.catalogue));
        }
        if !self.selected.contains(&label) {
            self.selected.push(label);
        }
        format!("Selected: {}", self.selected.join(", "))
    }

    fn start_analysis(&mut self, text: &str) -> String {
        let mut request = AnalysisRequest::new(text, self.selected.clone());
        request.age = self.age.clone();
        request.gender = self.gender.clone();

        let results = match analyse(&request, &self.catalogue, self.cfg.detection()) {
            Ok(results) => results,
            Err(e) => return e.to_string(),
        };

        let ticket = self.session.begin_analysis(&request);
        let delay = self.cfg.delays().analysis;
        self.spawn_after(delay, Completion::Analysis { ticket, results });
        "Analysing symptoms...".to_string()
    }

    fn send_chat(&mut self, message: &str) -> Option<String> {
        // Blank messages are ignored without a prompt.
        let reply = respond(message, &self.catalogue, self.cfg.detection()).ok()?;
        self.session
            .record_user_message(message, chrono::Local::now());
        let delay = self.cfg.delays().chat;
        self.spawn_after(delay, Completion::Reply(reply));
        None
    }

    fn start_treatment(&mut self, condition: &str) -> String {
        match plan_for(condition, &self.catalogue) {
            Ok(plan) => {
                let delay = self.cfg.delays().treatment;
                self.spawn_after(delay, Completion::Treatment(plan));
                "Generating treatment plan...".to_string()
            }
            Err(e) => e.to_string(),
        }
    }

    fn spawn_after(&self, delay: Duration, completion: Completion) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            // The receiver only goes away when the shell is shutting down.
            let _ = tx.send(completion);
        });
    }

    /// Apply finished work to the session and return what to print, if anything.
    pub fn handle_completion(&mut self, completion: Completion) -> Option<String> {
        match completion {
            Completion::Analysis { ticket, results } => {
                if !self.session.complete_analysis(ticket, results) {
                    return None;
                }
                if self.session.module() == Module::Prediction {
                    return Some(self.render_current());
                }
                let outcome = views::prediction_outcome(
                    self.session.prediction().unwrap_or_default(),
                    &self.catalogue,
                );
                Some(render::prediction_outcome(&outcome))
            }
            Completion::Reply(reply) => {
                self.session.record_reply(&reply, chrono::Local::now());
                Some(render::chat_reply(&reply))
            }
            Completion::Treatment(plan) => {
                let text = render::treatment(&plan);
                self.session.set_treatment(plan);
                Some(text)
            }
        }
    }
}

/// Run the interactive shell until `quit` or end of input.
pub async fn run(cfg: CoreConfig, catalogue: Catalogue) -> Result<()> {
    let catalogue = Arc::new(catalogue);
    let session = Session::start(&catalogue, &mut rand::thread_rng());
    let (mut shell, mut completions) = Shell::new(cfg, catalogue, session);

    println!("{}", shell.render_current());
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match shell.handle_line(&line) {
                    Step::Quit => break,
                    Step::Continue(Some(output)) => println!("{output}"),
                    Step::Continue(None) => {}
                }
            }
            Some(completion) = completions.recv() => {
                if let Some(output) = shell.handle_completion(completion) {
                    println!("{output}");
                }
            }
        }
    }

    tracing::debug!("shell closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthai_core::{Delays, DetectionMode};

    fn shell() -> (Shell, mpsc::UnboundedReceiver<Completion>) {
        let cfg = CoreConfig::new(DetectionMode::Substring, Delays::none(), None).unwrap();
        let catalogue = Arc::new(Catalogue::embedded().unwrap());
        Shell::new(cfg, catalogue, Session::new("tip"))
    }

    #[tokio::test]
    async fn analysis_result_arrives_through_channel() {
        let (mut shell, mut rx) = shell();
        shell.handle_line("open prediction");
        shell.handle_line("select runny nose");
        shell.handle_line("select sneezing");
        let step = shell.handle_line("analyse cough");
        assert_eq!(step, Step::Continue(Some("Analysing symptoms...".into())));
        assert!(shell.session().is_analysis_pending());

        let completion = rx.recv().await.unwrap();
        let output = shell.handle_completion(completion).unwrap();
        assert!(output.contains("Common Cold"));
        assert!(!shell.session().is_analysis_pending());
    }

    #[tokio::test]
    async fn only_latest_analysis_is_published() {
        let (mut shell, mut rx) = shell();
        shell.handle_line("analyse cough");
        shell.handle_line("analyse nausea");

        let mut published = 0;
        for _ in 0..2 {
            let completion = rx.recv().await.unwrap();
            if shell.handle_completion(completion).is_some() {
                published += 1;
            }
        }
        assert!(published >= 1);

        let expected = analyse(
            &AnalysisRequest::new("nausea", vec![]),
            &Catalogue::embedded().unwrap(),
            DetectionMode::Substring,
        )
        .unwrap();
        assert_eq!(shell.session().prediction().unwrap(), expected.as_slice());
    }

    #[tokio::test]
    async fn empty_analysis_prompts_without_ticket() {
        let (mut shell, _rx) = shell();
        let step = shell.handle_line("analyse");
        assert_eq!(
            step,
            Step::Continue(Some(
                "Please describe your symptoms or select from the checklist.".into()
            ))
        );
        assert!(!shell.session().is_analysis_pending());
    }

    #[tokio::test]
    async fn chat_records_both_sides() {
        let (mut shell, mut rx) = shell();
        assert_eq!(shell.handle_line("chat thanks!"), Step::Continue(None));
        assert_eq!(shell.session().transcript().messages().len(), 1);

        let output = shell.handle_completion(rx.recv().await.unwrap()).unwrap();
        assert!(output.starts_with("Assistant: You're welcome!"));
        assert_eq!(shell.session().transcript().messages().len(), 2);
    }

    #[tokio::test]
    async fn blank_chat_is_ignored() {
        let (mut shell, _rx) = shell();
        assert_eq!(shell.handle_line("chat   "), Step::Continue(None));
        assert!(shell.session().transcript().is_empty());
    }

    #[tokio::test]
    async fn unknown_module_keeps_current_one() {
        let (mut shell, _rx) = shell();
        shell.handle_line("open medications");
        let Step::Continue(Some(output)) = shell.handle_line("open billing") else {
            panic!("expected an error message");
        };
        assert!(output.contains("unknown module 'billing'"));
        assert_eq!(shell.session().module(), Module::Medications);
    }

    #[tokio::test]
    async fn treatment_is_stored_on_completion() {
        let (mut shell, mut rx) = shell();
        shell.handle_line("treat Hypertension");
        shell.handle_completion(rx.recv().await.unwrap());
        assert_eq!(shell.session().treatment().unwrap().condition, "Hypertension");
        assert_eq!(shell.handle_line("quit"), Step::Quit);
    }
}
