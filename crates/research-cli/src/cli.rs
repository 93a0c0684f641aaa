//! Command handlers.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use log::info;
use research_core::{
    config::ORCHESTRATOR_WORKFLOW,
    display::{RunLog, Sessions},
    events::decode_lines,
    export::write_export,
    fixtures::mock_research_run,
    plan::split_backend_payload,
    reducer,
    run::Applied,
    MockTransport, PlanReview, ResearchConfig, ResearchSession, RunId, RunRunner, RunState,
    SessionStore,
};
use serde_json::json;

use crate::{
    args::{ConfirmArgs, ExportArgs, MockArgs, PlanCommands, ReplayArgs, SessionCommands},
    renderer::TerminalRenderer,
};

/// Reads a whole file, or stdin when `source` is `-`.
fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    read_file(Path::new(source))
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub struct Cli {
    config: ResearchConfig,
    store: SessionStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(config: ResearchConfig, store: SessionStore, renderer: TerminalRenderer) -> Self {
        Self {
            config,
            store,
            renderer,
        }
    }

    pub fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Parse(input) => {
                let review = PlanReview::new(&read_source(&input.file)?);
                self.renderer.show(review.plan());
                Ok(())
            }
            PlanCommands::Confirm(args) => self.confirm_plan(args),
            PlanCommands::Split(input) => {
                let payload = split_backend_payload(&read_source(&input.file)?);
                match payload.plan {
                    Some(plan) => self.renderer.render(&format!(
                        "## Plan\n\n{plan}\n\n## Message\n\n{}\n",
                        payload.message
                    )),
                    None => self.renderer.render(&payload.message),
                }
                Ok(())
            }
        }
    }

    /// Prints the literal message that would be sent to the planner.
    fn confirm_plan(&self, args: ConfirmArgs) -> Result<()> {
        let mut review = PlanReview::new(&read_source(&args.input.file)?);

        if let Some(feedback) = args.feedback {
            let Some(response) = review.request_changes(&feedback) else {
                bail!("Feedback must not be empty");
            };
            println!("{}", response.as_message());
            return Ok(());
        }

        for step in args.disable {
            if step == 0 {
                bail!("Step numbers start at 1");
            }
            review
                .set_enabled(step - 1, false)
                .with_context(|| format!("Cannot disable step {step}"))?;
        }

        if !review.can_confirm() {
            bail!("At least one step must stay selected");
        }
        println!("{}", review.confirm().as_message());
        Ok(())
    }

    pub fn replay(&self, args: ReplayArgs) -> Result<()> {
        let text = read_file(&args.events)?;
        let events = decode_lines(&text)
            .with_context(|| format!("Failed to decode {}", args.events.display()))?;

        let baseline = match (&args.baseline, &args.session) {
            (Some(path), _) => read_file(path)?,
            (None, Some(id)) => self.store.require(id)?.report_markdown,
            (None, None) => String::new(),
        };

        info!("Replaying {} events", events.len());
        let mut state = reducer::replay(RunState::new(RunId(1), baseline), events);
        if let Some(message) = args.fail {
            reducer::fail(&mut state, message);
        }

        self.render_run(&state, args.log, args.report);
        Ok(())
    }

    pub async fn mock(&self, args: MockArgs) -> Result<()> {
        let session = self.store.require(&args.session_id)?;
        let delay = args
            .delay_ms
            .map_or(self.config.mock_delay, Duration::from_millis);

        let state = self.run_mock(&session, delay, true).await?;
        self.render_run(&state, false, true);
        Ok(())
    }

    /// Streams the scripted run of `session` through the async runner.
    async fn run_mock(
        &self,
        session: &ResearchSession,
        delay: Duration,
        show_entries: bool,
    ) -> Result<RunState> {
        info!(
            "Running scripted stream for {} (deployment: {})",
            session.research_id,
            self.config.deployment_name.as_deref().unwrap_or("none")
        );

        let transport = MockTransport::new(mock_research_run(session)).with_delay(delay);
        let mut runner = RunRunner::new(transport, ORCHESTRATOR_WORKFLOW, session.status);
        runner
            .start(
                json!({
                    "research_id": session.research_id,
                    "initial_query": session.initial_query,
                }),
                &session.report_markdown,
            )
            .await
            .with_context(|| runner.status_line().to_string())?;

        while let Some(applied) = runner.next().await {
            if !show_entries || applied == Applied::Discarded {
                continue;
            }
            if let Some(entry) = runner.state().and_then(|state| state.log().last()) {
                self.renderer.show(entry);
            }
        }

        info!("{}", runner.status_line());
        runner
            .state()
            .cloned()
            .context("Run finished without state")
    }

    fn render_run(&self, state: &RunState, show_log: bool, show_report: bool) {
        self.renderer.show(state);
        if show_log {
            self.renderer.render("\n## Log\n");
            self.renderer.show(&RunLog(state.log()));
        }
        if show_report {
            self.renderer.render("\n---\n");
            self.renderer.render(state.report_text());
        }
    }

    pub fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::List => self.list_sessions(),
            SessionCommands::Show { id } => self.renderer.show(&self.store.require(&id)?),
        }
        Ok(())
    }

    pub fn list_sessions(&self) {
        self.renderer
            .render(&format!("# {}\n", self.config.sessions_title));
        self.renderer.show(&Sessions(self.store.list()));
    }

    pub async fn export(&self, args: ExportArgs) -> Result<()> {
        let session = self.store.require(&args.session_id)?;
        let run = if args.run_mock {
            Some(self.run_mock(&session, Duration::ZERO, false).await?)
        } else {
            None
        };

        let path = write_export(
            &self.config.export_dir,
            &session,
            run.as_ref(),
            args.format.into(),
        )
        .context("Failed to write export")?;
        println!("{}", path.display());
        Ok(())
    }
}
