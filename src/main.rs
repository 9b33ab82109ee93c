use anyhow::Context;
use clap::Parser;
use trial_awards::calculate::{calculate, resolve_output_path, CalculationRequest};
use trial_awards::cli::{resolve_flag, Cli, Commands};
use trial_awards::config::Settings;
use trial_awards::logging;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // 結果は「Complete」か「Error: ...」の1行で報告する
    match run(cli) {
        Ok(()) => println!("Complete"),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.settings.as_deref()).context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Calculate {
            input,
            output,
            competition,
            no_ties,
            keep_ties,
            new_file,
            same_file,
            format,
        } => {
            println!("🏆 trial-awards - {} 判定\n", competition);

            let new_file = resolve_flag(new_file, same_file, settings.defaults.write_to_new_file);
            let request = CalculationRequest {
                output: resolve_output_path(&input, output.as_deref(), new_file),
                input,
                kind: competition,
                break_ties: resolve_flag(no_ties, keep_ties, settings.defaults.break_ties_by_class),
                format,
            };

            println!("[1/2] 出場表を読み込み中... {}", request.input.display());
            let summary = calculate(&request, &settings)?;
            println!(
                "✔ {}クラス・{}賞を判定（採点なし{}件を除外）\n",
                summary.report.classes.len(),
                summary.report.awards.len(),
                summary.unscored
            );

            println!("[2/2] 結果を保存");
            for path in &summary.written {
                println!("✔ 出力: {}", path.display());
            }
        }

        Commands::Config { init, show } => {
            if init {
                let path = settings
                    .save(cli.settings.as_deref())
                    .context("設定ファイルの書き込みに失敗")?;
                println!("✔ 設定ファイルを書き出しました: {}", path.display());
            }

            if show || !init {
                println!("設定:");
                println!("  クラス階層: {}", settings.class_hierarchy.tokens().join(", "));
                println!("  クラス順位で同点決着: {}", settings.defaults.break_ties_by_class);
                println!("  新しいファイルに出力: {}", settings.defaults.write_to_new_file);
            }
        }
    }

    Ok(())
}
