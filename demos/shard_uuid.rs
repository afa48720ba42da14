//! Simple command that prints one or '-n count' UUID strings of the '-t type' chosen, or the
//! fields of the UUIDs passed with '-d'

use std::{env, io, io::Write, process::ExitCode};

use shard_uuid::Uuid;

#[derive(Clone, Copy, Debug)]
enum Kind {
    Local,
    Dispersed,
    V1,
    V4,
    V6,
    Comb,
}

impl Kind {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "local" => Some(Self::Local),
            "dispersed" => Some(Self::Dispersed),
            "v1" => Some(Self::V1),
            "v4" => Some(Self::V4),
            "v6" => Some(Self::V6),
            "comb" => Some(Self::Comb),
            _ => None,
        }
    }

    fn generate(self) -> Uuid {
        match self {
            Self::Local => shard_uuid::uuid_local(),
            Self::Dispersed => shard_uuid::uuid_dispersed(),
            Self::V1 => shard_uuid::uuid1(),
            Self::V4 => shard_uuid::uuid4(),
            Self::V6 => shard_uuid::uuid6(),
            Self::Comb => shard_uuid::comb(),
        }
    }
}

#[derive(Debug, Default)]
struct Opts {
    kind: Option<Kind>,
    count: Option<usize>,
    decompose: Vec<Uuid>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-t local|dispersed|v1|v4|v6|comb] [-n count] [-d uuid]...",
                    program.as_deref().unwrap_or("shard_uuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    if !opts.decompose.is_empty() {
        for e in opts.decompose {
            let d = e.decompose();
            write!(buf, "{} version={:x}", e, d.version_marker())?;
            if let (Some(pid), Some(mac), Some(ts)) =
                (d.process_id(), d.mac_fragment(), d.unix_ts_ms())
            {
                write!(
                    buf,
                    " process_id={} mac={:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x} unix_ts_ms={}",
                    pid, mac[0], mac[1], mac[2], mac[3], mac[4], mac[5], ts
                )?;
            }
            writeln!(buf)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let kind = opts.kind.unwrap_or(Kind::Dispersed);
    for _ in 0..opts.count.unwrap_or(1) {
        writeln!(buf, "{}", kind.generate())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Opts, String> {
    let mut opts = Opts::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            "-t" => {
                if opts.kind.is_some() {
                    return Err("option 't' given more than once".to_owned());
                }
                let Some(t_arg) = args.next() else {
                    return Err("argument to option 't' missing".to_owned());
                };
                let Some(k) = Kind::parse(&t_arg) else {
                    return Err(format!("invalid argument to option 't': '{}'", t_arg));
                };
                opts.kind.replace(k);
            }
            "-d" => {
                let Some(d_arg) = args.next() else {
                    return Err("argument to option 'd' missing".to_owned());
                };
                let Ok(e) = d_arg.parse::<Uuid>() else {
                    return Err(format!("invalid argument to option 'd': '{}'", d_arg));
                };
                opts.decompose.push(e);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    if !opts.decompose.is_empty() && (opts.kind.is_some() || opts.count.is_some()) {
        return Err("option 'd' cannot be combined with 't' or 'n'".to_owned());
    }
    Ok(opts)
}
