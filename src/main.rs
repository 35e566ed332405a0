extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate macspoof;

use std::io;
use std::process;
use std::time::Duration;

use clap::{
    App,
    AppSettings,
    Arg,
    ArgMatches,
    SubCommand,
};

use macspoof::agent::{
    configured_source,
    random_user_agent,
};
use macspoof::mac::{
    MacAddress,
    MacController,
    OsTag,
};
use macspoof::sys::interfaces::interface_names;
use macspoof::{
    Config,
    Console,
};

fn os_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("os")
        .long("os")
        .value_name("OS")
        .help("Target OS: unix, macos or windows [default: running OS]")
        .takes_value(true)
}

fn interface_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("interface")
        .value_name("INTERFACE")
        .help("Network interface name, e.g. eth0 or Ethernet")
        .required(true)
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("macspoof")
        .about("Inspects and randomizes MAC addresses, fetches pages with a spoofed User-Agent")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("registry-scan-limit")
                .long("registry-scan-limit")
                .value_name("N")
                .help("Adapter registry subkeys inspected on Windows")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("HTTP request timeout")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("body-limit")
                .long("body-limit")
                .value_name("BYTES")
                .help("Largest HTTP response body read")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("user-agent-source")
                .long("user-agent-source")
                .value_name("URL")
                .help("URL of a newline separated User-Agent list")
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("current")
                .about("Prints the current MAC address of an interface")
                .arg(interface_arg())
                .arg(os_arg()),
        )
        .subcommand(
            SubCommand::with_name("random")
                .about("Prints a random unicast MAC address")
                .arg(os_arg()),
        )
        .subcommand(
            SubCommand::with_name("change")
                .about("Applies a new MAC address to an interface (needs privileges)")
                .arg(interface_arg())
                .arg(os_arg())
                .arg(
                    Arg::with_name("mac")
                        .long("mac")
                        .value_name("MAC")
                        .help("Address to apply instead of a random one")
                        .takes_value(true),
                ),
        )
        .subcommand(SubCommand::with_name("interfaces").about("Lists local network interfaces"))
        .subcommand(SubCommand::with_name("user-agent").about("Prints a random browser User-Agent"))
        .subcommand(
            SubCommand::with_name("fetch")
                .about("Fetches a URL with a browser User-Agent")
                .arg(
                    Arg::with_name("url")
                        .value_name("URL")
                        .required(true),
                )
                .arg(
                    Arg::with_name("user-agent")
                        .long("user-agent")
                        .value_name("UA")
                        .help("User-Agent to send instead of a random one")
                        .takes_value(true),
                ),
        )
}

/// Applies command line overrides on top of the environment configuration.
fn config(matches: &ArgMatches) -> Config {
    let mut config = Config::from_env();

    if let Some(limit) = matches.value_of("registry-scan-limit") {
        match limit.parse() {
            Ok(limit) => config.registry_scan_limit = limit,
            Err(_) => exit(&format!("Invalid --registry-scan-limit {}", limit)),
        }
    }

    if let Some(secs) = matches.value_of("timeout") {
        match secs.parse() {
            Ok(secs) => config.http_timeout = Duration::from_secs(secs),
            Err(_) => exit(&format!("Invalid --timeout {}", secs)),
        }
    }

    if let Some(limit) = matches.value_of("body-limit") {
        match limit.parse() {
            Ok(limit) => config.http_body_limit = limit,
            Err(_) => exit(&format!("Invalid --body-limit {}", limit)),
        }
    }

    if let Some(url) = matches.value_of("user-agent-source") {
        config.user_agent_source = Some(url.to_string());
    }

    config
}

fn os_tag(matches: &ArgMatches) -> String {
    match matches.value_of("os") {
        Some(os) => os.to_string(),
        None => OsTag::host().map(|os| os.to_string()).unwrap_or_default(),
    }
}

fn exit(msg: &str) -> ! {
    eprintln!("{}", msg);
    process::exit(2);
}

fn main() {
    env_logger::init();

    let matches = app().get_matches();
    let config = config(&matches);
    debug!("{:?}", config);

    let stdout = io::stdout();
    let mut console = Console::new(stdout.lock());
    let mut controller = MacController::system().with_scan_limit(config.registry_scan_limit);

    let ok = match matches.subcommand() {
        ("current", Some(sub)) => console
            .read_current_mac(&mut controller, &os_tag(sub), sub.value_of("interface").unwrap_or_default())
            .is_some(),
        ("random", Some(sub)) => console
            .generate_random_mac(&mut controller, &os_tag(sub))
            .is_some(),
        ("change", Some(sub)) => {
            let mac = sub.value_of("mac").map(|mac| match mac.parse::<MacAddress>() {
                Ok(mac) => mac,
                Err(err) => exit(&err.to_string()),
            });
            console.change_mac(
                &mut controller,
                &os_tag(sub),
                sub.value_of("interface").unwrap_or_default(),
                mac,
            );
            true
        }
        ("interfaces", Some(_)) => match interface_names() {
            Ok(names) => {
                for name in names {
                    println!("{}", name);
                }
                true
            }
            Err(err) => {
                eprintln!("Listing interfaces failed: {}", err);
                false
            }
        },
        ("user-agent", Some(_)) => {
            println!("{}", random_user_agent(&mut configured_source(&config)));
            true
        }
        ("fetch", Some(sub)) => {
            let url = sub.value_of("url").unwrap_or_default();
            match console.make_request_with_user_agent(url, sub.value_of("user-agent"), &config) {
                Some(response) => {
                    println!("HTTP {}", response.status);
                    true
                }
                None => false,
            }
        }
        _ => unreachable!("clap requires a subcommand"),
    };

    if !ok {
        process::exit(1);
    }
}
