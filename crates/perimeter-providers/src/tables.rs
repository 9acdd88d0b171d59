//! Ordered provider association tables.
//!
//! Each table is scanned top to bottom and the first matching entry wins,
//! so more specific patterns must appear before broader ones.

/// ASN/organization substrings (matched against uppercased nameserver text)
/// mapped to DNS hosting providers.
pub const DNS_PROVIDER_ORGS: &[(&str, &str)] = &[
    ("CLOUDFLARENET", "Cloudflare"),
    ("AMAZON-02", "Route53"),
    ("AMAZON-AES", "Route53"),
    ("SECURITYSERVICES", "UltraDNS"),
    ("DIGITALOCEAN-ASN", "DigitalOcean"),
    ("DNSIMPLE", "dnsimple"),
    ("MICROSOFT-CORP-MSN-AS-BLOCK", "Azure"),
    ("NSONE", "NS1"),
    ("AKAMAI-ASN2", "Akamai"),
    ("GODADDY-DNS", "GoDaddy"),
    ("GOOGLE", "Google"),
    ("EDGECAST", "Edgecast"),
    ("RACKSPACE-LON", "Rackspace"),
    ("RMH-14", "Rackspace"),
    ("RACKSPACE", "Rackspace"),
    ("LUMEN-LEGACY-L3-", "Lumen Technologies"),
    ("DEFENSE-NET", "Defense.Net (F5)"),
    ("EDNS", "EasyDNS"),
    ("RCODEZERO-ANYCAST-SEC1-TLD RCODEZERO ANYCAST DNS", "RcodeZero"),
    ("RCODEZERO-ANYCAST-SEC2 RCODEZERO ANYCAST DNS", "RcodeZero"),
    ("TIGEE", "DNSMadeEasy"),
];

/// Secondary hostname keywords (matched against lowercased nameserver text)
/// for nameservers whose organization text matches no entry above.
pub const DNS_HOSTNAME_KEYWORDS: &[(&str, &str)] = &[
    ("cloudflare", "Cloudflare"),
    ("awsdns", "Amazon Route53"),
    ("amazon", "Amazon Route53"),
    ("azure", "Microsoft Azure"),
    ("microsoft", "Microsoft Azure"),
    ("googledomains", "Google Domains"),
    ("google", "Google Cloud DNS"),
    ("godaddy", "GoDaddy"),
    ("domaincontrol", "GoDaddy"),
    ("dnsmadeeasy", "DNS Made Easy"),
    ("dnsimple", "DNSimple"),
    ("cloudns", "ClouDNS"),
    ("namecheap", "Namecheap"),
    ("hostgator", "HostGator"),
    ("digitalocean", "DigitalOcean"),
    ("linode", "Linode"),
    ("nsone", "NS1"),
    ("ns1", "NS1"),
    ("ns2", "NS1"),
    ("dyn", "Oracle Dyn"),
    ("akamai", "Akamai"),
    ("ultradns", "UltraDNS"),
    ("rackspace", "Rackspace"),
    ("zonomi", "Zonomi"),
    ("easydns", "EasyDNS"),
    ("hover", "Hover"),
    ("rage4", "Rage4"),
    ("constellix", "Constellix"),
    ("rcodezero", "RcodeZero"),
];

/// Keywords (matched against lowercased MX exchange text) mapped to email
/// hosting providers.
pub const EMAIL_PROVIDER_KEYWORDS: &[(&str, &str)] = &[
    ("aspmx.l.google.com", "Google Workspace"),
    ("googlemail", "Google Workspace"),
    ("google", "Google Workspace"),
    ("gmail", "Google Workspace"),
    ("mx.protection.outlook.com", "Microsoft 365"),
    ("protection.outlook.com", "Microsoft 365"),
    ("outlook", "Microsoft 365"),
    ("hotmail", "Microsoft 365"),
    ("office365", "Microsoft 365"),
    ("exchangelabs", "Microsoft 365"),
    ("microsoft", "Microsoft 365"),
    ("live.com", "Microsoft 365"),
    ("mimecast", "Mimecast"),
    ("pphosted", "Proofpoint"),
    ("proofpoint", "Proofpoint"),
    ("messagelabs", "Symantec"),
    ("mx.zoho", "Zoho Mail"),
    ("zoho", "Zoho Mail"),
    ("amazonses", "Amazon SES"),
    ("mailgun", "Mailgun"),
    ("sendgrid", "SendGrid"),
    ("postmarkapp", "Postmark"),
    ("mx.yandex", "Yandex Mail"),
    ("mail.ru", "Mail.ru"),
    ("mx.mail.yahoo.com", "Yahoo Mail"),
    ("yahoodns", "Yahoo Mail"),
    ("mx1.ovh", "OVH"),
    ("gmx", "GMX"),
    ("mailhostbox", "Hostbox"),
    ("barracuda", "Barracuda"),
    ("spamexperts", "SpamExperts"),
    ("kaspersky", "Kaspersky"),
    ("hostedemail", "Rackspace Email"),
    ("emailsrvr", "Rackspace Email"),
    ("mxroute", "MXroute"),
    ("fastmail", "FastMail"),
];

/// Keywords (matched against lowercased registry text) mapped to well-known
/// hosting providers. Used as a backstop when RDAP data has no usable
/// organization field.
pub const HOSTING_PROVIDER_KEYWORDS: &[(&str, &str)] = &[
    ("amazon web services", "Amazon AWS"),
    ("amazon", "Amazon AWS"),
    ("aws", "Amazon AWS"),
    ("azure", "Microsoft Azure"),
    ("microsoft", "Microsoft"),
    ("googlecloud", "Google Cloud"),
    ("google", "Google Cloud"),
    ("cloudflare", "Cloudflare"),
    ("digitalocean", "DigitalOcean"),
    ("linode", "Linode"),
    ("ovh", "OVH"),
    ("rackspace", "Rackspace"),
    ("vultr", "Vultr"),
    ("hetzner", "Hetzner"),
    ("godaddy", "GoDaddy"),
    ("hostgator", "HostGator"),
    ("namecheap", "Namecheap"),
    ("gandi", "Gandi"),
    ("ionos", "IONOS"),
    ("dreamhost", "DreamHost"),
    ("bluehost", "Bluehost"),
];
