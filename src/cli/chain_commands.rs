use uuid::Uuid;

use crate::cli::context::CLIContext;
use crate::model::*;

pub fn sender(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Sending as {}", ctx.sender);
        return;
    }
    if let Some(p) = ctx.principal(args) {
        println!("Now sending as {}", p);
        ctx.sender = p;
    }
}

pub fn height(ctx: &CLIContext) {
    println!("Block height: {}", ctx.chain.block_height());
}

pub fn mine(ctx: &mut CLIContext, args: &str) {
    let count = if args.is_empty() {
        1
    } else {
        match args.parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                println!("Usage: mine [count]");
                return;
            }
        }
    };
    match ctx.chain.mine_empty_blocks(count) {
        Ok(h) => println!("Mined {} block(s); height is now {}", count, h),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn receipts(ctx: &CLIContext) {
    match ctx.chain.receipts() {
        Ok(list) if list.is_empty() => println!("No transactions yet."),
        Ok(list) => {
            println!("Transactions ({}):", list.len());
            for r in &list {
                println!("  {}", summarize(r));
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn receipt(ctx: &CLIContext, args: &str) {
    let tx_id = match Uuid::parse_str(args.trim()) {
        Ok(id) => id,
        Err(_) => {
            println!("Usage: receipt <tx-id>");
            return;
        }
    };

    match ctx.chain.receipt(tx_id) {
        Ok(r) if ctx.json => match serde_json::to_string_pretty(&r) {
            Ok(json) => println!("{}", json),
            Err(e) => ctx.print_error(&e.into()),
        },
        Ok(r) => {
            println!("{}", summarize(&r));
            println!("  submitted at {}", r.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        Err(e) => ctx.print_error(&e),
    }
}

fn summarize(r: &Receipt) -> String {
    let outcome = match r.result {
        TxResult::Ok { value } => format!("ok u{}", value),
        TxResult::Err { code } => format!("err {}", code),
    };
    format!(
        "#{} block {} {} {}({}) -> {} [{}]",
        r.seq,
        r.block_height,
        r.sender,
        r.function,
        r.args.join(", "),
        outcome,
        r.tx_id
    )
}
