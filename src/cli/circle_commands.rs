use crate::cli::context::CLIContext;
use crate::model::*;
use crate::queries::stats_queries;

pub fn create(ctx: &mut CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.read_line("Circle name: ") {
            Some(s) => s,
            None => return,
        }
    };

    match ctx.chain.call_create_circle(&name, &ctx.sender) {
        Ok(receipt) => match receipt.result {
            TxResult::Ok { value } => println!(
                "Created circle {} '{}' at block {} (tx {})",
                value, name, receipt.block_height, receipt.tx_id
            ),
            TxResult::Err { code } => println!(
                "Transaction {} failed at block {}: {}",
                receipt.tx_id, receipt.block_height, code
            ),
        },
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CLIContext, args: &str) {
    let Some(id) = ctx.circle_id(args, "circle <id>") else {
        return;
    };

    match ctx.chain.registry().get_circle(id) {
        Ok(view) if ctx.json => match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}", json),
            Err(e) => ctx.print_error(&e.into()),
        },
        Ok(view) => {
            println!();
            println!("Circle {}", id);
            println!("Name: {}", view.name);
            println!("Creator: {}", view.creator);
            println!("Created at block: {}", view.created_at);
            println!("Members: {}", view.member_count);
            println!("Active: {}", if view.is_active { "yes" } else { "no" });
            println!();
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn members(ctx: &CLIContext, args: &str) {
    let Some(id) = ctx.circle_id(args, "members <id>") else {
        return;
    };

    match ctx.chain.registry().get_circle_members(id) {
        Ok(members) => {
            println!("Members of circle {} ({}):", id, members.len());
            for m in &members {
                println!("  {}", m);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn is_member(ctx: &CLIContext, args: &str) {
    let mut parts = args.split_whitespace();
    let (id_arg, who_arg) = match (parts.next(), parts.next()) {
        (Some(id), Some(who)) => (id, who),
        (Some(id), None) => (id, ctx.sender.as_str()),
        _ => {
            println!("Usage: is-member <id> [principal]");
            return;
        }
    };

    let Some(id) = ctx.circle_id(id_arg, "is-member <id> [principal]") else {
        return;
    };
    let Some(who) = ctx.principal(who_arg) else {
        return;
    };

    match ctx.chain.registry().is_circle_member(id, &who) {
        Ok(true) => println!("{} is a member of circle {}", who, id),
        Ok(false) => println!("{} is not a member of circle {}", who, id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn total(ctx: &CLIContext) {
    match ctx.chain.registry().get_total_circles() {
        Ok(n) => println!("Total circles: {}", n),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn user_circles(ctx: &CLIContext, args: &str) {
    let who = if args.is_empty() {
        ctx.sender.clone()
    } else {
        match ctx.principal(args) {
            Some(p) => p,
            None => return,
        }
    };

    match ctx.chain.registry().get_user_circles(&who) {
        Ok(circles) if circles.is_empty() => {
            println!("{} is not in any circle yet. Use 'create-circle <name>' to start one.", who)
        }
        Ok(circles) => {
            println!("Circles for {} ({}):", who, circles.len());
            for c in &circles {
                println!("  #{} {} ({} members)", c.id, c.name, c.member_count);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn print_stats(ctx: &CLIContext) {
    let conn = ctx.chain.registry().connection();
    match stats_queries::stats(conn) {
        Ok(s) => {
            println!();
            println!("Circles: {} ({} active)", s.total_circles, s.active_circles);
            println!("Distinct members: {}", s.distinct_members);
            println!("Distinct creators: {}", s.distinct_creators);
            if let Some((name, height)) = s.latest {
                println!("Latest: '{}' at block {}", name, height);
            }
            println!("Block height: {}", ctx.chain.block_height());
            println!();
        }
        Err(e) => ctx.print_error(&e),
    }

    match stats_queries::verify_invariants(conn) {
        Ok(v) if v.is_empty() => {}
        Ok(v) => {
            println!("Invariant violations:");
            for line in &v {
                println!("  {}", line);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}
