//! Plain-text rendering for command output

use roster_api::filter::DATE_FORMAT;
use roster_api::model::{Agent, Member};

pub fn member_table(rows: &[Member]) {
    if rows.is_empty() {
        println!("No members matched");
        return;
    }
    println!(
        "{:<10} {:<22} {:<14} {:>6} {:>6} {:<8} {:<8}",
        "LOGIN ID", "NAME", "PHONE", "FEE%", "REF%", "STATUS", "ARCHIVED"
    );
    for member in rows {
        println!(
            "{:<10} {:<22} {:<14} {:>6.1} {:>6.1} {:<8} {:<8}",
            member.login_id,
            member.name,
            member.phone,
            member.membership_fee_rate,
            member.referral_fee_rate,
            member.status.as_str(),
            if member.is_active { "no" } else { "yes" },
        );
    }
}

pub fn member_detail(member: &Member) {
    println!("Login id:            {}", member.login_id);
    println!("Name:                {}", member.name);
    println!("Email:               {}", member.email);
    println!("Gender:              {}", member.gender.as_str());
    println!("Phone:               {}", member.phone);
    if let Some(alt_phone) = &member.alt_phone {
        println!("Alt phone:           {}", alt_phone);
    }
    println!(
        "Date of birth:       {}",
        member.date_of_birth.format(DATE_FORMAT)
    );
    println!("Membership fee rate: {}%", member.membership_fee_rate);
    println!("Referral fee rate:   {}%", member.referral_fee_rate);
    println!("Transactions:        {}", member.transaction_count);
    match &member.referrer {
        Some(referrer) => println!("Referrer:            {} ({})", referrer.name, referrer.id),
        None => println!("Referrer:            direct"),
    }
    if let Some(agent_id) = &member.agent_id {
        println!("Agent:               {}", agent_id);
    }
    println!("Status:              {}", member.status.as_str());
    println!(
        "Archived:            {}",
        if member.is_active { "no" } else { "yes" }
    );
    if let Some(created_at) = member.created_at {
        println!("Registered:          {}", created_at.format(DATE_FORMAT));
    }
}

pub fn agent_table(rows: &[Agent]) {
    if rows.is_empty() {
        println!("No agents found");
        return;
    }
    println!("{:<10} {:<22} {:<14} {:<6}", "ID", "NAME", "PHONE", "ACTIVE");
    for agent in rows {
        println!(
            "{:<10} {:<22} {:<14} {:<6}",
            agent.id,
            agent.name,
            agent.phone.as_deref().unwrap_or("-"),
            if agent.is_active { "yes" } else { "no" },
        );
    }
}
