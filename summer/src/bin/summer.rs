use gumdrop::Options as _;
use summer::{Args, Builtin};
use summer_config::Settings;
use summer_irc::Bot;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from([".dev.env", ".log.env"]);
    alto_logger::TermLogger::new(
        alto_logger::Options::default()
            .with_time(alto_logger::TimeConfig::relative_now())
            .with_style(alto_logger::StyleConfig::SingleLine),
    )?
    .init()?;

    let args = Args::parse_args_default_or_exit();

    log::info!("loading configuration from {}", args.config);
    let settings = Settings::load_from_file(&args.config).await?;
    settings.validate()?;

    log::trace!("binding handlers");
    let handlers = Builtin::bind(&settings);

    if args.dry_run {
        Bot::connect(&args.address(), settings, handlers).await?;
        log::info!("dry run, not starting the bot");
        return Ok(());
    }

    summer_irc::create_bot(&args.address(), settings, handlers).await
}
