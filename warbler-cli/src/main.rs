mod config;

use std::io::Write as _;
use std::time::Duration;

use clap::Parser;
use config::Config;
use warbler_core as wc;

#[derive(Parser)]
#[command(name = "warbler", about = "A terminal client for the warbler music backend")]
struct Args {
    /// Backend base URL, overriding the config file.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warbler=info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load();
    let base_url = args.base_url.unwrap_or(config.server.base_url);

    let logic = wc::Logic::new(wc::LogicArgs { base_url });
    let mut events = logic.subscribe();
    // The most recently browsed tracks (home feed or recommendations),
    // addressable by `pick <n>`.
    let mut browse: Vec<wc::warbler_state::Track> = vec![];

    // Blocking stdin reads happen on their own thread; the main loop stays
    // free to pump the engine.
    let (line_tx, line_rx) = std::sync::mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    let _ = line_tx.send("quit".to_string());
                    break;
                }
                Ok(_) => {
                    let _ = line_tx.send(line.trim().to_string());
                }
            }
        }
    });

    println!("warbler ready. Type `help` for commands.");
    loop {
        logic.update();
        drain_events(&mut events, &mut browse);

        match line_rx.try_recv() {
            Ok(line) => {
                if !dispatch(&logic, &line, &browse) {
                    break;
                }
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {}
            Err(std::sync::mpsc::TryRecvError::Disconnected) => break,
        }

        std::thread::sleep(Duration::from_millis(50));
    }

    Ok(())
}

fn drain_events(
    events: &mut tokio::sync::broadcast::Receiver<wc::Event>,
    browse: &mut Vec<wc::warbler_state::Track>,
) {
    use tokio::sync::broadcast::error::TryRecvError;

    loop {
        match events.try_recv() {
            Ok(event) => render_event(event, browse),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("display lagged by {skipped} events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn render_event(event: wc::Event, browse: &mut Vec<wc::warbler_state::Track>) {
    use wc::Event as E;
    match event {
        E::TrackStarted { track, liked } => {
            println!("now playing: {}{}", describe(&track), like_mark(liked));
        }
        E::TrackRestored {
            track,
            position,
            liked,
        } => {
            println!(
                "restored: {}{} (paused at {})",
                describe(&track),
                like_mark(liked),
                fmt_duration(position)
            );
        }
        // Too chatty for a line-oriented display; `now` shows the position.
        E::PositionChanged { .. } => {}
        E::PlaybackStateChanged(state) => {
            tracing::debug!("playback state: {state:?}");
        }
        E::QueueUpdated(queue) => {
            println!("up next ({}):", queue.len());
            print_tracks(&queue);
        }
        E::SearchLoaded { query, tracks } => {
            println!("results for \"{query}\":");
            print_tracks(&tracks);
        }
        E::HomeLoaded(sections) => {
            browse.clear();
            for section in sections {
                println!("== {} ==", section.label);
                for track in &section.tracks {
                    browse.push(track.clone());
                    println!("{:3}. {}", browse.len(), describe(track));
                }
            }
        }
        E::RecommendationsLoaded(tracks) => {
            println!("recommended:");
            print_tracks(&tracks);
            *browse = tracks;
        }
        E::ChatChunk(chunk) => {
            print!("{chunk}");
            let _ = std::io::stdout().flush();
        }
        E::ChatEnded => println!(),
        E::Notice(message) => println!("{message}"),
    }
}

/// Dispatch one command line. Returns false when the session should end.
fn dispatch(logic: &wc::Logic, line: &str, browse: &[wc::warbler_state::Track]) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => print_help(),
        "search" => logic.search(rest.to_string()),
        "play" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => logic.play_at(n - 1),
            _ => logic.search_and_play(rest.to_string()),
        },
        "queue" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => logic.play_from_queue(n - 1),
            _ => print_tracks(&logic.queue()),
        },
        "next" => logic.next_track(),
        "prev" => logic.prev_track(),
        "pause" => logic.toggle_playback(),
        "shuffle" => println!(
            "shuffle {}",
            if logic.toggle_shuffle() { "on" } else { "off" }
        ),
        "auto" => println!(
            "autoplay {}",
            if logic.toggle_autoplay() { "on" } else { "off" }
        ),
        "seek" => match rest.parse::<f64>() {
            Ok(pct) => logic.seek(pct / 100.0),
            Err(_) => println!("usage: seek <percent>"),
        },
        "like" => match logic.toggle_like_current() {
            Some(true) => println!("liked"),
            Some(false) => println!("unliked"),
            None => println!("nothing playing"),
        },
        "history" => print_tracks(&logic.history()),
        "liked" => print_tracks(&logic.liked()),
        "lists" => {
            for (name, tracks) in logic.playlists() {
                println!("{name} ({} tracks)", tracks.len());
            }
        }
        "list" => match logic.playlists().get(rest) {
            Some(tracks) => print_tracks(tracks),
            None => println!("no playlist named \"{rest}\""),
        },
        "playlist" => logic.play_playlist(rest, 0),
        "playliked" => logic.play_liked(rest.parse::<usize>().map_or(0, |n| n.saturating_sub(1))),
        "addlist" => match logic.add_current_to_playlist(rest) {
            Some(wc::AddOutcome::Added) => println!("added to \"{rest}\""),
            Some(wc::AddOutcome::AlreadyPresent) => println!("already in \"{rest}\""),
            None => println!("nothing playing"),
        },
        "dellist" => {
            if !logic.delete_playlist(rest) {
                println!("no playlist named \"{rest}\"");
            }
        }
        "remlist" => match rest.rsplit_once(' ') {
            Some((name, n)) if n.parse::<usize>().is_ok() => {
                let n = n.parse::<usize>().unwrap_or(0);
                let id = logic
                    .playlists()
                    .get(name)
                    .and_then(|tracks| tracks.get(n.wrapping_sub(1)))
                    .map(|track| track.id.clone());
                match id {
                    Some(id) if logic.remove_from_playlist(name, &id) => {
                        println!("removed from \"{name}\"");
                    }
                    _ => println!("no such entry"),
                }
            }
            _ => println!("usage: remlist <name> <n>"),
        },
        "delhist" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => {
                match logic.history().get(n - 1).map(|track| track.id.clone()) {
                    Some(id) => logic.remove_history(id),
                    None => println!("no such entry"),
                }
            }
            _ => println!("usage: delhist <n>"),
        },
        "pick" => match rest.parse::<usize>() {
            Ok(n) if n > 0 && n <= browse.len() => logic.play_external(browse[n - 1].clone()),
            _ => println!("usage: pick <n> (after `home` or `rec`)"),
        },
        "home" => logic.load_home(),
        "rec" => logic.recommend(rest.to_string()),
        "chat" => logic.chat(rest.to_string()),
        "url" => match logic.download_url() {
            Some(url) => println!("{url}"),
            None => println!("nothing playing"),
        },
        "now" => match logic.now_playing() {
            Some(info) => {
                println!(
                    "{}{} [{} / {}]{}",
                    describe(&info.track),
                    like_mark(info.liked),
                    fmt_duration(info.position),
                    info.duration.map_or("?".to_string(), fmt_duration),
                    if info.paused { " (paused)" } else { "" },
                );
            }
            None => println!("nothing playing"),
        },
        "quit" | "exit" => return false,
        other => println!("unknown command {other:?}; try `help`"),
    }
    true
}

fn print_help() {
    println!(
        "\
search <query>     load search results as the playlist
play <n|query>     play playlist entry n, or search and play
queue [n]          show the predicted queue, or play entry n from it
next / prev        move through the playlist
pause              toggle playback
shuffle / auto     toggle shuffle / autoplay prediction
seek <percent>     seek within the current track
like               toggle like on the current track
history / liked    show listening history / liked songs
lists              show playlist names
list <name>        show a playlist's tracks
playlist <name>    play a playlist from the start
playliked [n]      play the liked songs, optionally from entry n
addlist <name>     add the current track to a playlist
dellist <name>     delete a playlist
remlist <name> <n> remove entry n from a playlist
delhist <n>        remove entry n from history
home               load the discovery feed
rec <prompt>       ask for recommendations
pick <n>           play entry n from the last home feed or recommendations
chat <prompt>      chat with the assistant
url                print the current track's audio URL
now                show the current track and position
quit               exit"
    );
}

fn describe(track: &wc::warbler_state::Track) -> String {
    if track.primary_artists.is_empty() {
        track.name.clone()
    } else {
        format!("{} - {}", track.name, track.primary_artists)
    }
}

fn like_mark(liked: bool) -> &'static str {
    if liked { " [liked]" } else { "" }
}

fn print_tracks(tracks: &[wc::warbler_state::Track]) {
    if tracks.is_empty() {
        println!("(empty)");
        return;
    }
    for (i, track) in tracks.iter().enumerate() {
        println!("{:3}. {}", i + 1, describe(track));
    }
}

fn fmt_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
