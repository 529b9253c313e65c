use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args as ClapArgs, Parser, Subcommand};
use gateway_client::{GatewayClient, GatewayConfig, HttpGatewayClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wellness_core::quiz::ANSWER_MIDPOINT;
use wellness_core::{
    ActivityLevel, DietaryPreference, Gender, Goal, Mood, Outcome, YogaExperience,
};
use wellness_flows::{
    default_session_dir, ChatFlow, CheckInFlow, DashboardPanel, IntakeWizard, Navigation, QuizFlow,
    SessionStore, TodayPanel, TraceMode, TracePanel, NO_QUESTIONS_MESSAGE,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(name = "wellness")]
#[command(about = "Daily check-ins, quizzes and personalized yoga and nutrition plans")]
struct Args {
    /// Base URL of the wellness service. Falls back to WELLNESS_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the local session. Falls back to WELLNESS_SESSION_DIR.
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create your profile and start a session
    Onboard(OnboardArgs),
    /// Record today's check-in and get a plan
    Checkin(CheckInArgs),
    /// Take the mental health and wellness quiz
    Quiz(QuizArgs),
    /// Show progress stats, trends and top items
    Dashboard,
    /// Show today's yoga session and meals
    Today,
    /// Show the AI decision traces
    Traces {
        /// Show the 10 most recent traces instead of today's
        #[arg(long)]
        recent: bool,
    },
    /// Chat with the wellness coach
    Chat {
        /// Send one message and print the reply. Without it the chat reads
        /// messages from the terminal until an empty line or end of input.
        #[arg(long)]
        message: Option<String>,
    },
    /// Show the user of the current session
    Whoami,
}

#[derive(Debug, ClapArgs)]
struct OnboardArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long, default_value_t = 25)]
    age: u32,

    /// male, female or other
    #[arg(long, value_parser = parse_gender, default_value = "other")]
    gender: Gender,

    /// beginner, intermediate or advanced
    #[arg(long, value_parser = parse_experience, default_value = "beginner")]
    yoga_experience: YogaExperience,

    /// sedentary, light, moderate, active or very_active
    #[arg(long, value_parser = parse_activity, default_value = "moderate")]
    activity_level: ActivityLevel,

    /// Dietary preference (repeatable): vegetarian, vegan, omnivore, pescatarian
    #[arg(long = "diet", value_parser = parse_diet)]
    diets: Vec<DietaryPreference>,

    /// Goal (repeatable): weight_loss, muscle_gain, stress_relief, flexibility,
    /// general_wellness
    #[arg(long = "goal", value_parser = parse_goal)]
    goals: Vec<Goal>,
}

#[derive(Debug, ClapArgs)]
struct CheckInArgs {
    /// happy, neutral, sad or stressed
    #[arg(long, value_parser = parse_mood, default_value = "neutral")]
    mood: Mood,

    /// 1-10
    #[arg(long, default_value_t = 5, allow_hyphen_values = true)]
    mood_score: i64,

    /// 0-10 in steps of 0.5
    #[arg(long, default_value_t = 5.0)]
    appetite: f64,

    /// 0-10 in steps of 0.5
    #[arg(long, default_value_t = 5.0)]
    energy: f64,

    /// 0-24 in steps of 0.5
    #[arg(long, default_value_t = 7.0)]
    sleep_hours: f64,

    /// Plan adherence yesterday, 0-100
    #[arg(long, default_value_t = 50)]
    adherence: i64,

    /// Comma separated ingredients you have on hand
    #[arg(long, default_value = "")]
    ingredients: String,

    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Debug, ClapArgs)]
struct QuizArgs {
    /// Answer as question_id=value (repeatable). Without answers the quiz
    /// asks each question on the terminal.
    #[arg(long = "answer", value_parser = parse_answer)]
    answers: Vec<(String, i64)>,
}

fn pick<T: Copy>(all: &[T], name: fn(&T) -> &'static str, raw: &str) -> Result<T, String> {
    let raw = raw.trim();
    all.iter()
        .copied()
        .find(|item| name(item).eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            let names: Vec<&str> = all.iter().map(name).collect();
            format!("expected one of: {}", names.join(", "))
        })
}

fn parse_gender(raw: &str) -> Result<Gender, String> {
    pick(&Gender::ALL, Gender::as_str, raw)
}

fn parse_experience(raw: &str) -> Result<YogaExperience, String> {
    pick(&YogaExperience::ALL, YogaExperience::as_str, raw)
}

fn parse_activity(raw: &str) -> Result<ActivityLevel, String> {
    pick(&ActivityLevel::ALL, ActivityLevel::as_str, raw)
}

fn parse_diet(raw: &str) -> Result<DietaryPreference, String> {
    pick(&DietaryPreference::ALL, DietaryPreference::as_str, raw)
}

fn parse_goal(raw: &str) -> Result<Goal, String> {
    pick(&Goal::ALL, Goal::as_str, raw)
}

fn parse_mood(raw: &str) -> Result<Mood, String> {
    raw.parse()
}

fn parse_answer(raw: &str) -> Result<(String, i64), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question_id=value, got {}", raw))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("answer for {} is not a number", id))?;
    Ok((id.trim().to_string(), value))
}

/// Turn a flow outcome into the command's result.
fn finish(outcome: Outcome, error: Option<String>) -> CliResult<()> {
    match outcome {
        Outcome::Completed => Ok(()),
        Outcome::Failed => Err(error
            .unwrap_or_else(|| "Request failed".to_string())
            .into()),
        Outcome::Ignored => Err("A request is already in progress".into()),
        Outcome::Discarded => Err("The response arrived after the view closed".into()),
    }
}

async fn require_user(session: &SessionStore) -> CliResult<i64> {
    session
        .user_id()
        .await
        .ok_or_else(|| "No session found. Run `wellness onboard` first.".into())
}

async fn onboard(
    gateway: Arc<dyn GatewayClient>,
    session: Arc<SessionStore>,
    args: OnboardArgs,
) -> CliResult<()> {
    if let Some(user) = session.current().await {
        return Err(format!(
            "Already onboarded as {} (user {}). Remove {} to start over.",
            user.name,
            user.id,
            session.path().display()
        )
        .into());
    }

    let wizard = IntakeWizard::new(gateway, session);

    wizard
        .update(|form| {
            form.name = args.name;
            form.email = args.email;
            form.set_age(args.age);
            form.gender = args.gender;
        })
        .await;
    wizard.next().await;

    wizard
        .update(|form| {
            form.yoga_experience = args.yoga_experience;
            form.activity_level = args.activity_level;
        })
        .await;
    for diet in args.diets {
        wizard.toggle_dietary_preference(diet).await;
    }
    for goal in args.goals {
        wizard.toggle_goal(goal).await;
    }

    let outcome = wizard.complete().await;
    finish(outcome, wizard.error().await)?;

    if let Some(user) = wizard.user().await {
        println!("Welcome, {}! Your profile is saved (user {}).", user.name, user.id);
    }
    Ok(())
}

async fn check_in(gateway: Arc<dyn GatewayClient>, user_id: i64, args: CheckInArgs) -> CliResult<()> {
    let flow = CheckInFlow::new(gateway, user_id);
    flow.update(|form| {
        form.set_mood(args.mood);
        form.set_mood_score(args.mood_score);
        form.set_appetite(args.appetite);
        form.set_energy(args.energy);
        form.set_sleep_hours(args.sleep_hours);
        form.set_adherence(args.adherence);
        form.ingredients = args.ingredients;
        form.notes = args.notes;
    })
    .await;

    let outcome = flow.submit().await;
    finish(outcome, flow.error().await)?;

    if let Some(view) = flow.view().await {
        println!("{}", view);
    }
    Ok(())
}

async fn quiz(gateway: Arc<dyn GatewayClient>, user_id: i64, args: QuizArgs) -> CliResult<()> {
    let quiz = QuizFlow::new(gateway, user_id);
    finish(quiz.load().await, quiz.error().await)?;

    if quiz.is_empty().await {
        println!("{}", NO_QUESTIONS_MESSAGE);
        return Ok(());
    }

    let interactive = args.answers.is_empty();
    for (id, value) in &args.answers {
        if quiz.set_response(id, *value).await.is_none() {
            return Err(format!("Unknown question id: {}", id).into());
        }
    }

    let total = quiz.questions().await.len();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            if let Some(question) = quiz.current_question().await {
                println!(
                    "\n[{} of {}, {:.0}%] {}",
                    quiz.current_index().await + 1,
                    total,
                    quiz.progress().await,
                    question.question
                );
                println!("Answer 1-10 (Enter keeps {}):", ANSWER_MIDPOINT);
                if let Some(line) = lines.next_line().await? {
                    if let Ok(value) = line.trim().parse::<i64>() {
                        quiz.answer(value).await;
                    }
                }
            }
        }

        match quiz.next().await {
            Navigation::Moved(_) => continue,
            Navigation::Submitted(outcome) => {
                finish(outcome, quiz.error().await)?;
                break;
            }
            Navigation::Unchanged => break,
        }
    }

    println!("\nQuiz Completed! Here are your wellness scores:");
    for line in quiz.score_lines().await {
        println!("  {}", line);
    }
    Ok(())
}

async fn chat(
    gateway: Arc<dyn GatewayClient>,
    user_id: i64,
    message: Option<String>,
) -> CliResult<()> {
    let chat = ChatFlow::new(gateway, user_id);
    for line in chat.history().await {
        println!("{}", line);
    }

    if let Some(message) = message {
        let outcome = chat.send(&message).await;
        if let Some(reply) = chat.last_reply().await {
            println!("{}", reply);
        }
        return finish(outcome, chat.error().await);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            break;
        }
        let outcome = chat.send(&line).await;
        if outcome == Outcome::Failed {
            warn!("Chat request failed: {}", chat.error().await.unwrap_or_default());
        }
        if let Some(reply) = chat.last_reply().await {
            println!("{}", reply);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = GatewayConfig::from_env()?;
    if let Some(url) = args.api_url {
        config = config.with_base_url(url)?;
    }
    let session_dir = args.session_dir.unwrap_or_else(default_session_dir);

    let client = HttpGatewayClient::new(config)?;
    info!("Using {} at {}", client.name(), client.config().base_url);
    let gateway: Arc<dyn GatewayClient> = Arc::new(client);
    let session = Arc::new(SessionStore::open(session_dir)?);

    match args.command {
        Command::Onboard(onboard_args) => onboard(gateway, session, onboard_args).await,
        Command::Checkin(checkin_args) => {
            let user_id = require_user(&session).await?;
            check_in(gateway, user_id, checkin_args).await
        }
        Command::Quiz(quiz_args) => {
            let user_id = require_user(&session).await?;
            quiz(gateway, user_id, quiz_args).await
        }
        Command::Dashboard => {
            let panel = DashboardPanel::new(gateway, require_user(&session).await?);
            finish(panel.load().await, panel.error().await)?;
            if let Some(dashboard) = panel.dashboard().await {
                println!("{}", dashboard);
            }
            Ok(())
        }
        Command::Today => {
            let panel = TodayPanel::new(gateway, require_user(&session).await?);
            finish(panel.load().await, panel.error().await)?;
            if let Some(today) = panel.today().await {
                println!("{}", today);
            }
            Ok(())
        }
        Command::Traces { recent } => {
            let panel = TracePanel::new(gateway, require_user(&session).await?);
            let mode = if recent { TraceMode::Recent } else { TraceMode::Today };
            finish(panel.show(mode).await, panel.error().await)?;
            if let Some(list) = panel.traces().await {
                println!("{} decision traces\n", mode.label());
                println!("{}", list);
            }
            Ok(())
        }
        Command::Chat { message } => {
            let user_id = require_user(&session).await?;
            chat(gateway, user_id, message).await
        }
        Command::Whoami => match session.current().await {
            Some(user) => {
                println!("{} <{}> (user {})", user.name, user.email, user.id);
                Ok(())
            }
            None => Err("No session found. Run `wellness onboard` first.".into()),
        },
    }
}
