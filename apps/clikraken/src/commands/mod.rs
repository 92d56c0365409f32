//! One module per subcommand
//!
//! Every command builds its parameters, performs a single call through
//! [`crate::api::query_api`] and renders the result. A call without result
//! ends the command successfully without output.

pub mod private;
pub mod public;

use std::io::Write;

use crate::cli::Command;
use crate::config::DEFAULT_SETTINGS_INI;
use crate::context::Context;
use crate::error::CliResult;

pub async fn dispatch(ctx: &Context, command: &Command, out: &mut dyn Write) -> CliResult<()> {
    match command {
        Command::GenerateSettings => {
            writeln!(out, "{}", DEFAULT_SETTINGS_INI)?;
            Ok(())
        }

        // ===== Public =====
        Command::Ticker(args) => public::ticker::run(ctx, args, out).await,
        Command::Depth(args) => public::depth::run(ctx, args, out).await,
        Command::LastTrades(args) => public::last_trades::run(ctx, args, out).await,
        Command::Ohlc(args) => public::ohlc::run(ctx, args, out).await,
        Command::AssetPairs => public::asset_pairs::run(ctx, out).await,

        // ===== Private =====
        Command::Balance => private::balance::balance(ctx, out).await,
        Command::TradeBalance => private::balance::trade_balance(ctx, out).await,
        Command::Place(args) => private::place::run(ctx, args, out).await,
        Command::Cancel(args) => private::cancel::run(ctx, args, out).await,
        Command::Olist(args) => private::orders::olist(ctx, args, out).await,
        Command::Clist(args) => private::orders::clist(ctx, args, out).await,
        Command::Positions => private::positions::run(ctx, out).await,
        Command::Ledgers(args) => private::ledgers::run(ctx, args, out).await,
        Command::Trades(args) => private::trades::run(ctx, args, out).await,
        Command::DepositMethods(args) => private::deposit::methods(ctx, args, out).await,
        Command::DepositAddresses(args) => private::deposit::addresses(ctx, args, out).await,
        Command::Withdraw(args) => private::withdraw::withdraw(ctx, args, out).await,
        Command::ListWithdrawals(args) => private::withdraw::list(ctx, args, out).await,
        Command::ListWithdrawInformation(args) => {
            private::withdraw::information(ctx, args, out).await
        }
    }
}
