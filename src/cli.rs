use bandext::{extend_with_resample, io::wav, viz, BitDepth, ExtendParams};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage();
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    let mut params = ExtendParams::new();
    let mut spectrogram_dir: Option<String> = None;
    let mut verbose = false;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--cutoff" | "-c" => {
                i += 1;
                params.cutoff_freq = parse_f32(&args, i, "cutoff");
            }
            "--max-freq" | "-m" => {
                i += 1;
                params.target_max_freq = parse_f32(&args, i, "max-freq");
            }
            "--transition" | "-t" => {
                i += 1;
                params.transition_width = parse_f32(&args, i, "transition");
            }
            "--gain" | "-g" => {
                i += 1;
                params.gain = parse_f32(&args, i, "gain");
            }
            "--fft-size" => {
                i += 1;
                params.fft_size = parse_usize(&args, i, "fft-size");
            }
            "--hop-size" => {
                i += 1;
                params.hop_size = parse_usize(&args, i, "hop-size");
            }
            "--out-sr" => {
                i += 1;
                params.output_sample_rate = Some(parse_u32(&args, i, "out-sr"));
            }
            "--bitdepth" | "-b" => {
                i += 1;
                params.bit_depth = parse_bitdepth(&args, i);
            }
            "--spectrogram" | "-s" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("ERROR: --spectrogram requires a directory");
                    std::process::exit(1);
                }
                spectrogram_dir = Some(args[i].clone());
            }
            "--verbose" | "-v" => verbose = true,
            other => {
                eprintln!("ERROR: Unknown option '{}'", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read input
    let buffer = match wav::read_wav_file(input_path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Input: {} frames, {} Hz, {} channel(s), {:.2}s",
        buffer.num_frames(),
        buffer.sample_rate,
        buffer.channels,
        buffer.duration_secs()
    );

    params.sample_rate = buffer.sample_rate;
    params.channels = buffer.channels;

    if let Err(e) = params.validate() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    if verbose {
        eprintln!("Parameters:");
        eprintln!("  Cutoff: {:.0} Hz", params.cutoff_freq);
        eprintln!("  Max frequency: {:.0} Hz", params.target_max_freq);
        eprintln!("  Transition width: {:.0} Hz", params.transition_width);
        eprintln!("  Gain: {:.2}", params.gain);
        eprintln!("  FFT size: {} samples", params.fft_size);
        eprintln!("  Hop size: {} samples", params.hop_size);
        eprintln!("  Bit depth: {:?}", params.bit_depth);
    }

    let start = std::time::Instant::now();

    let output = match extend_with_resample(&buffer, &params) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("ERROR: Bandwidth extension failed: {}", e);
            std::process::exit(1);
        }
    };

    let elapsed = start.elapsed();

    eprintln!(
        "Output: {} frames, {} Hz, {:.2}s",
        output.num_frames(),
        output.sample_rate,
        output.duration_secs()
    );

    if verbose {
        let processing_secs = elapsed.as_secs_f64();
        let realtime_factor = if processing_secs > 0.0 {
            buffer.duration_secs() / processing_secs
        } else {
            f64::INFINITY
        };
        eprintln!(
            "Processing time: {:.3}s ({:.1}x realtime)",
            processing_secs, realtime_factor
        );
    }

    if let Err(e) = wav::write_wav_file(output_path, &output, params.bit_depth) {
        eprintln!("ERROR: Failed to write {}: {}", output_path, e);
        std::process::exit(1);
    }

    eprintln!("Written to {}", output_path);

    if let Some(dir) = spectrogram_dir {
        write_spectrograms(&dir, output_path, &buffer, &output);
    }
}

/// Renders before/after spectrograms of the first channel. Failures here
/// are reported but never abort: the audio output is already on disk.
fn write_spectrograms(
    dir: &str,
    output_path: &str,
    before: &bandext::AudioBuffer,
    after: &bandext::AudioBuffer,
) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("WARNING: Could not create {}: {}", dir, e);
        return;
    }

    let stem = std::path::Path::new(output_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let renders = [
        (before, format!("{}/{}_original.png", dir, stem)),
        (after, format!("{}/{}_extended.png", dir, stem)),
    ];
    for (buffer, path) in &renders {
        let mono = buffer.channel_data(0);
        match viz::render_spectrogram(&mono, buffer.sample_rate, path) {
            Ok(()) => eprintln!("Spectrogram written to {}", path),
            Err(e) => eprintln!("WARNING: Spectrogram failed for {}: {}", path, e),
        }
    }
}

fn print_usage() {
    eprintln!("Usage: bandext-cli <input.wav> <output.wav> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --cutoff, -c <hz>      Frequency where synthesis starts (default: 22000)");
    eprintln!("  --max-freq, -m <hz>    Highest synthesized frequency (default: 47500)");
    eprintln!("  --transition, -t <hz>  Original-to-synthetic cross-fade width (default: 1500)");
    eprintln!("  --gain, -g <f>         Synthetic band gain (default: 1.5)");
    eprintln!("  --fft-size <n>         STFT window length (default: 8192)");
    eprintln!("  --hop-size <n>         STFT hop length (default: 2048)");
    eprintln!("  --out-sr <hz>          Output sample rate (default: working rate, >= 96000)");
    eprintln!("  --bitdepth, -b <d>     Output encoding: 16, 24, 32, float (default: 32)");
    eprintln!("  --spectrogram, -s <dir> Write before/after spectrogram PNGs to <dir>");
    eprintln!("  --verbose, -v          Show detailed parameters and timing");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  bandext-cli in.wav out.wav");
    eprintln!("  bandext-cli in.wav out.wav --cutoff 16000 --max-freq 40000 --gain 1.2");
    eprintln!("  bandext-cli in.wav out.wav --out-sr 96000 --bitdepth float -s plots");
}

fn parse_f32(args: &[String], idx: usize, name: &str) -> f32 {
    if idx >= args.len() {
        eprintln!("ERROR: --{} requires a value", name);
        std::process::exit(1);
    }
    match args[idx].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", name, args[idx]);
            std::process::exit(1);
        }
    }
}

fn parse_u32(args: &[String], idx: usize, name: &str) -> u32 {
    if idx >= args.len() {
        eprintln!("ERROR: --{} requires a value", name);
        std::process::exit(1);
    }
    match args[idx].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", name, args[idx]);
            std::process::exit(1);
        }
    }
}

fn parse_usize(args: &[String], idx: usize, name: &str) -> usize {
    if idx >= args.len() {
        eprintln!("ERROR: --{} requires a value", name);
        std::process::exit(1);
    }
    match args[idx].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", name, args[idx]);
            std::process::exit(1);
        }
    }
}

fn parse_bitdepth(args: &[String], idx: usize) -> BitDepth {
    if idx >= args.len() {
        eprintln!("ERROR: --bitdepth requires a value (16, 24, 32, float)");
        std::process::exit(1);
    }
    match BitDepth::parse(&args[idx]) {
        Some(d) => d,
        None => {
            eprintln!(
                "ERROR: Unknown bit depth '{}' (use 16, 24, 32, or float)",
                args[idx]
            );
            std::process::exit(1);
        }
    }
}
