//! Command dispatcher: routes typed commands to collaborators.
//!
//! Every collaborator or user-input failure is recovered here into a status
//! message; the session continues. The only way out of the editor is the
//! `exit` verb, surfaced to the main loop as [`Outcome::Exit`].

use super::Command;
use crate::backend::{Artifact, CredentialPrompt, CredentialStore, Generator, Runner};
use crate::error::{Error, Result};
use crate::session::{Notice, Session, StatusLine};
use std::fs;
use std::time::Duration;

/// What the main loop should do after a dispatch.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep editing; any message is on the session's status line.
    Continue,
    /// Show these full-screen notices in order, then keep editing.
    Notices(Vec<Notice>),
    /// Terminate the session.
    Exit,
}

/// Executes commands against the session and the collaborator boundaries.
pub struct Dispatcher<'a> {
    generator: &'a dyn Generator,
    runner: &'a dyn Runner,
    keystore: &'a dyn CredentialStore,
    prompt: &'a mut dyn CredentialPrompt,
    run_timeout: Duration,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over the given collaborators.
    pub fn new(
        generator: &'a dyn Generator,
        runner: &'a dyn Runner,
        keystore: &'a dyn CredentialStore,
        prompt: &'a mut dyn CredentialPrompt,
        run_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            runner,
            keystore,
            prompt,
            run_timeout,
        }
    }

    /// Parse and execute one completed command string.
    ///
    /// Never fails: parse and collaborator errors become an error status on
    /// the session.
    pub fn dispatch(&mut self, session: &mut Session, input: &str) -> Outcome {
        let command = match Command::parse(input) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue,
            Err(e) => {
                session.set_status(StatusLine::error(e.to_string()));
                return Outcome::Continue;
            }
        };
        log::info!("dispatch: {command:?}");
        match self.execute(session, command) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("command failed: {e}");
                session.set_status(StatusLine::error(e.to_string()));
                Outcome::Continue
            }
        }
    }

    fn execute(&mut self, session: &mut Session, command: Command) -> Result<Outcome> {
        match command {
            Command::Compile => {
                let notice = self.compile(session, "Press any key to return to the editor.")?;
                Ok(Outcome::Notices(vec![notice]))
            }
            Command::Execute => {
                let compile_notice =
                    self.compile(session, "Press any key to view the execution output.")?;
                let run_notice = self.run_artifact(session)?;
                Ok(Outcome::Notices(vec![compile_notice, run_notice]))
            }
            Command::Run => {
                let notice = self.run_artifact(session)?;
                Ok(Outcome::Notices(vec![notice]))
            }
            Command::SavePy(filename) => {
                let artifact = session.artifact.as_ref().ok_or(Error::NoArtifact)?;
                fs::write(&filename, artifact.code_for_saving())?;
                session.set_status(StatusLine::info(format!(
                    "generated code saved to '{filename}'"
                )));
                Ok(Outcome::Continue)
            }
            Command::Open(filename) => {
                let contents = fs::read_to_string(&filename)
                    .map_err(|_| Error::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("file '{filename}' not found"),
                    )))?;
                session.load(&contents);
                session.set_status(StatusLine::info(format!("opened '{filename}'")));
                Ok(Outcome::Continue)
            }
            Command::Save(filename) => {
                fs::write(&filename, session.buffer.contents())?;
                session.set_status(StatusLine::info(format!("saved to '{filename}'")));
                Ok(Outcome::Continue)
            }
            Command::DeleteKey => {
                if self.keystore.delete()? {
                    session.set_status(StatusLine::info("API key deleted"));
                } else {
                    session.set_status(StatusLine::error("no API key stored"));
                }
                Ok(Outcome::Continue)
            }
            Command::Rekey => {
                match self.prompt.ask("Enter new API key: ")? {
                    Some(key) if !key.trim().is_empty() => {
                        self.keystore.save(key.trim())?;
                        session.set_status(StatusLine::info("API key updated and saved"));
                    }
                    _ => session.set_status(StatusLine::error("API key unchanged")),
                }
                Ok(Outcome::Continue)
            }
            Command::Help => Ok(Outcome::Notices(vec![help_notice()])),
            Command::Exit => Ok(Outcome::Exit),
        }
    }

    /// Compile the buffer, store the artifact, and build the result notice.
    fn compile(&mut self, session: &mut Session, footer: &str) -> Result<Notice> {
        let key = self.require_key()?;
        let output = self.generator.generate(&session.buffer.contents(), &key)?;
        let artifact = Artifact::new(&output.code, output.status);
        let body = artifact.status().lines().map(str::to_string).collect();
        session.artifact = Some(artifact);
        Ok(Notice::new("Compile Result", body, footer))
    }

    /// Run the stored artifact and build the output notice.
    ///
    /// A timeout is reported distinctly from a generic failure so the user
    /// knows the code may have partially run.
    fn run_artifact(&mut self, session: &mut Session) -> Result<Notice> {
        let artifact = session.artifact.as_ref().ok_or(Error::NoArtifact)?;
        // A compile can succeed with an empty code section (e.g. the
        // generator only reported errors); there is nothing to run.
        if artifact.code().trim().is_empty() {
            return Err(Error::NoArtifact);
        }
        let output = self.runner.run(artifact.code(), self.run_timeout)?;

        let mut body = Vec::new();
        if output.terminated_by_timeout {
            body.push(format!(
                "execution timed out after {}s; output below may be partial",
                self.run_timeout.as_secs()
            ));
            body.push(String::new());
        }
        body.extend(output.stdout.lines().map(str::to_string));
        if !output.stderr.is_empty() {
            body.push(String::new());
            body.extend(output.stderr.lines().map(str::to_string));
        }

        let mut notice = Notice::new(
            "Code Execution Output",
            body,
            "Press ';' to return to the editor.",
        );
        notice.dismiss = Some(';');
        Ok(notice)
    }

    /// Load the API key, prompting for one (and persisting it) if absent.
    fn require_key(&mut self) -> Result<String> {
        if let Some(key) = self.keystore.load() {
            return Ok(key);
        }
        match self.prompt.ask("Enter API key: ")? {
            Some(key) if !key.trim().is_empty() => {
                let key = key.trim().to_string();
                self.keystore.save(&key)?;
                Ok(key)
            }
            _ => Err(Error::Credential("no API key provided".to_string())),
        }
    }
}

fn help_notice() -> Notice {
    let body = [
        ";compile          - Compile the YAML via the code generator",
        ";execute          - Compile then immediately run the generated code",
        ";run              - Execute the code from the last compile",
        ";savepy <file>    - Save generated code (from last compile) to a file",
        ";open <file>      - Open a file into the buffer",
        ";save <file>      - Save the current buffer to a file",
        ";deletekey        - Delete the saved API key",
        ";rekey            - Re-enter and save a new API key",
        ";help             - Show this help message",
        ";exit             - Exit the editor",
    ];
    Notice::new(
        "Available commands",
        body.iter().map(|s| (*s).to_string()).collect(),
        "Press any key to return to the editor.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GenerateOutput, RunOutput};
    use crate::session::StatusKind;
    use std::cell::RefCell;

    struct FakeGenerator {
        code: &'static str,
        status: &'static str,
        fail: bool,
        calls: RefCell<usize>,
    }

    impl FakeGenerator {
        fn ok(code: &'static str, status: &'static str) -> Self {
            Self {
                code,
                status,
                fail: false,
                calls: RefCell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                code: "",
                status: "",
                fail: true,
                calls: RefCell::new(0),
            }
        }
    }

    impl Generator for FakeGenerator {
        fn generate(&self, _source: &str, _api_key: &str) -> Result<GenerateOutput> {
            *self.calls.borrow_mut() += 1;
            if self.fail {
                return Err(Error::Generator("connection refused".to_string()));
            }
            Ok(GenerateOutput {
                code: self.code.to_string(),
                status: self.status.to_string(),
            })
        }
    }

    struct FakeRunner {
        timed_out: bool,
    }

    impl Runner for FakeRunner {
        fn run(&self, _code: &str, _timeout: Duration) -> Result<RunOutput> {
            Ok(RunOutput {
                stdout: "out".to_string(),
                stderr: String::new(),
                terminated_by_timeout: self.timed_out,
                exit_code: if self.timed_out { None } else { Some(0) },
            })
        }
    }

    struct MemoryKeyStore {
        key: RefCell<Option<String>>,
    }

    impl MemoryKeyStore {
        fn with_key(key: &str) -> Self {
            Self {
                key: RefCell::new(Some(key.to_string())),
            }
        }

        fn empty() -> Self {
            Self {
                key: RefCell::new(None),
            }
        }
    }

    impl CredentialStore for MemoryKeyStore {
        fn load(&self) -> Option<String> {
            self.key.borrow().clone()
        }

        fn save(&self, credential: &str) -> Result<()> {
            *self.key.borrow_mut() = Some(credential.to_string());
            Ok(())
        }

        fn delete(&self) -> Result<bool> {
            Ok(self.key.borrow_mut().take().is_some())
        }
    }

    struct FakePrompt {
        answer: Option<&'static str>,
    }

    impl CredentialPrompt for FakePrompt {
        fn ask(&mut self, _prompt: &str) -> Result<Option<String>> {
            Ok(self.answer.map(str::to_string))
        }
    }

    struct Fixture {
        generator: FakeGenerator,
        runner: FakeRunner,
        keystore: MemoryKeyStore,
        prompt: FakePrompt,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                generator: FakeGenerator::ok("```python\nprint(1)\n```", "Status: ok"),
                runner: FakeRunner { timed_out: false },
                keystore: MemoryKeyStore::with_key("sk-test"),
                prompt: FakePrompt { answer: None },
            }
        }

        fn dispatch(&mut self, session: &mut Session, input: &str) -> Outcome {
            let mut dispatcher = Dispatcher::new(
                &self.generator,
                &self.runner,
                &self.keystore,
                &mut self.prompt,
                Duration::from_secs(10),
            );
            dispatcher.dispatch(session, input)
        }
    }

    #[test]
    fn test_unknown_verb_sets_error_status() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        let outcome = fixture.dispatch(&mut session, "frobnicate");
        assert_eq!(outcome, Outcome::Continue);
        let status = session.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("unknown command"));
    }

    #[test]
    fn test_empty_command_is_noop() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        assert_eq!(fixture.dispatch(&mut session, "  "), Outcome::Continue);
        assert!(session.status.is_none());
    }

    #[test]
    fn test_compile_stores_fence_stripped_artifact() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        session.load("a: 1");
        let outcome = fixture.dispatch(&mut session, "compile");
        assert!(matches!(outcome, Outcome::Notices(_)));
        assert_eq!(session.artifact.as_ref().unwrap().code(), "print(1)");
    }

    #[test]
    fn test_compile_failure_recovered_as_status() {
        let mut fixture = Fixture::new();
        fixture.generator = FakeGenerator::failing();
        let mut session = Session::new(80, 10);
        let outcome = fixture.dispatch(&mut session, "compile");
        assert_eq!(outcome, Outcome::Continue);
        assert!(session.status.unwrap().text.contains("generator request failed"));
        assert!(session.artifact.is_none());
    }

    #[test]
    fn test_compile_prompts_for_missing_key_and_saves_it() {
        let mut fixture = Fixture::new();
        fixture.keystore = MemoryKeyStore::empty();
        fixture.prompt = FakePrompt { answer: Some("sk-new") };
        let mut session = Session::new(80, 10);
        fixture.dispatch(&mut session, "compile");
        assert_eq!(fixture.keystore.load().as_deref(), Some("sk-new"));
        assert!(session.artifact.is_some());
    }

    #[test]
    fn test_compile_with_cancelled_prompt_fails() {
        let mut fixture = Fixture::new();
        fixture.keystore = MemoryKeyStore::empty();
        let mut session = Session::new(80, 10);
        let outcome = fixture.dispatch(&mut session, "compile");
        assert_eq!(outcome, Outcome::Continue);
        assert!(session.status.unwrap().text.contains("no API key provided"));
    }

    #[test]
    fn test_run_without_artifact_reports_and_writes_nothing() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        let outcome = fixture.dispatch(&mut session, "run");
        assert_eq!(outcome, Outcome::Continue);
        assert!(session
            .status
            .unwrap()
            .text
            .contains("no generated code available"));
    }

    #[test]
    fn test_savepy_without_artifact_writes_no_file() {
        let mut fixture = Fixture::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.py");
        let mut session = Session::new(80, 10);
        let outcome = fixture.dispatch(&mut session, &format!("savepy {}", path.display()));
        assert_eq!(outcome, Outcome::Continue);
        assert!(session.status.unwrap().text.contains("no generated code"));
        assert!(!path.exists());
    }

    #[test]
    fn test_savepy_comments_header_lines() {
        let mut fixture = Fixture::new();
        fixture.generator = FakeGenerator::ok("Status: ok\nprint(1)", "Status: ok");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.py");
        let mut session = Session::new(80, 10);
        fixture.dispatch(&mut session, "compile");
        fixture.dispatch(&mut session, &format!("savepy {}", path.display()));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "#Status: ok\nprint(1)");
    }

    #[test]
    fn test_run_with_empty_code_section_reports_no_artifact() {
        let mut fixture = Fixture::new();
        fixture.generator = FakeGenerator::ok("", "Status: YAML had errors; no code generated");
        let mut session = Session::new(80, 10);
        fixture.dispatch(&mut session, "compile");
        let outcome = fixture.dispatch(&mut session, "run");
        assert_eq!(outcome, Outcome::Continue);
        assert!(session
            .status
            .unwrap()
            .text
            .contains("no generated code available"));
    }

    #[test]
    fn test_run_timeout_message_is_distinct() {
        let mut fixture = Fixture::new();
        fixture.runner = FakeRunner { timed_out: true };
        let mut session = Session::new(80, 10);
        fixture.dispatch(&mut session, "compile");
        let Outcome::Notices(notices) = fixture.dispatch(&mut session, "run") else {
            panic!("expected a run notice");
        };
        assert!(notices[0].body[0].contains("timed out"));
        assert_eq!(notices[0].dismiss, Some(';'));
    }

    #[test]
    fn test_execute_compiles_and_runs() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        let Outcome::Notices(notices) = fixture.dispatch(&mut session, "execute") else {
            panic!("expected notices");
        };
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].title, "Compile Result");
        assert_eq!(notices[1].title, "Code Execution Output");
        assert_eq!(*fixture.generator.calls.borrow(), 1);
    }

    #[test]
    fn test_open_and_save_round_trip() {
        let mut fixture = Fixture::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yaml");
        fs::write(&path, "a: 1\nb: 2").unwrap();
        let mut session = Session::new(80, 10);
        fixture.dispatch(&mut session, &format!("open {}", path.display()));
        assert_eq!(session.buffer.contents(), "a: 1\nb: 2");

        let out = dir.path().join("copy.yaml");
        fixture.dispatch(&mut session, &format!("save {}", out.display()));
        assert_eq!(fs::read_to_string(&out).unwrap(), "a: 1\nb: 2");
    }

    #[test]
    fn test_open_missing_file_reports_error() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        session.load("keep me");
        fixture.dispatch(&mut session, "open no-such-file.yaml");
        assert!(session.status.unwrap().text.contains("not found"));
        assert_eq!(session.buffer.contents(), "keep me");
    }

    #[test]
    fn test_deletekey_statuses() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        fixture.dispatch(&mut session, "deletekey");
        assert_eq!(session.status.as_ref().unwrap().kind, StatusKind::Info);
        fixture.dispatch(&mut session, "deletekey");
        assert_eq!(session.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_rekey_saves_new_key() {
        let mut fixture = Fixture::new();
        fixture.prompt = FakePrompt { answer: Some("sk-other") };
        let mut session = Session::new(80, 10);
        fixture.dispatch(&mut session, "rekey");
        assert_eq!(fixture.keystore.load().as_deref(), Some("sk-other"));
    }

    #[test]
    fn test_exit_outcome() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        assert_eq!(fixture.dispatch(&mut session, "exit"), Outcome::Exit);
    }

    #[test]
    fn test_help_lists_every_verb() {
        let mut fixture = Fixture::new();
        let mut session = Session::new(80, 10);
        let Outcome::Notices(notices) = fixture.dispatch(&mut session, "help") else {
            panic!("expected help notice");
        };
        let text = notices[0].body.join("\n");
        for verb in [
            "compile", "execute", "run", "savepy", "open", "save", "deletekey", "rekey", "help",
            "exit",
        ] {
            assert!(text.contains(verb), "help missing {verb}");
        }
    }
}
