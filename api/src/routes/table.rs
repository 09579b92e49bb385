//! The static route table: URL path patterns mapped to pages, each with the
//! access rule the session gate enforces.
//!
//! Patterns are `/`-separated static segments and `:name` parameters. The
//! `/*` pattern is the fallback and only matches when nothing else does.
//! Among the remaining candidates the most specific one wins: at the first
//! position where two patterns differ, a static segment beats a parameter.

use std::collections::HashMap;
use std::fmt;

use rocket::http::RawStr;
use serde::Serialize;

use crate::error::RouteTableError;
use crate::session::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    NotFound,
    Landing,
    Contact,
    SearchedRooms,
    RoomPreview,
    PaymentSuccess,
    PaymentFailure,

    AdminLogin,
    AdminDashboard,
    AdminUsers,
    AdminProviders,
    AdminBookings,
    AdminForgotPassword,
    AdminVerifyOtp,
    AdminChangePassword,
    AdminMessages,
    AdminProfile,
    AdminSales,
    AdminBookingDetails,

    ProviderLogin,
    ProviderSignup,
    ProviderDashboard,
    ProviderBookings,
    ProviderRooms,
    ProviderAddRoom,
    ProviderEditRoom,
    ProviderForgotPassword,
    ProviderVerifyOtp,
    ProviderOtpLogin,
    ProviderProfile,
    ProviderRegister,
    ProviderAccount,
    ProviderBookingDetails,

    UserLogin,
    UserSignup,
    UserForgotPassword,
    UserVerifyOtp,
    UserRegister,
    UserProfile,
    UserDashboard,
    UserChangePassword,
    UserNotifications,
    UserBookings,
    UserEditProfile,
    UserRooms,
    UserRentify,
    UserAddRoom,
    UserEditRoom,
    UserAddedRoom,
    UserWallet,
    UserCart,
}

impl Page {
    pub fn login_for(role: Role) -> Page {
        match role {
            Role::User => Page::UserLogin,
            Role::Provider => Page::ProviderLogin,
            Role::Admin => Page::AdminLogin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only while not signed in as the role; signed-in visitors go home.
    Guest(Role),
    Protected(Role),
}

impl Access {
    pub fn role(self) -> Option<Role> {
        match self {
            Access::Public => None,
            Access::Guest(role) | Access::Protected(role) => Some(role),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => f.write_str("public"),
            Access::Guest(role) => write!(f, "guest({role})"),
            Access::Protected(role) => write!(f, "protected({role})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    wildcard: bool,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, RouteTableError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RouteTableError::InvalidPattern(raw.to_string(), "empty pattern"));
        }
        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        if normalized == "/*" {
            return Ok(PathPattern {
                raw: normalized,
                segments: Vec::new(),
                wildcard: true,
            });
        }

        let mut segments = Vec::new();
        for part in normalized.split('/').filter(|part| !part.is_empty()) {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteTableError::InvalidPattern(
                        normalized.clone(),
                        "parameter without a name",
                    ));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if part.contains('*') {
                return Err(RouteTableError::InvalidPattern(
                    normalized.clone(),
                    "wildcards are only supported as `/*`",
                ));
            } else {
                segments.push(Segment::Static(part.to_string()));
            }
        }

        Ok(PathPattern {
            raw: normalized,
            segments,
            wildcard: false,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Parameter names are irrelevant to which paths a pattern accepts.
    fn shape(&self) -> String {
        if self.wildcard {
            return "/*".to_string();
        }
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(s) => s.to_ascii_lowercase(),
                Segment::Param(_) => ":".to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn specificity(&self) -> Vec<u8> {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(_) => 2,
                Segment::Param(_) => 1,
            })
            .collect()
    }

    fn matches(&self, parts: &[&str]) -> Option<HashMap<String, String>> {
        if self.wildcard {
            return Some(HashMap::new());
        }
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                // matched case-insensitively, like the browser router did
                Segment::Static(expected) if expected.eq_ignore_ascii_case(part) => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    let value = RawStr::new(part).percent_decode_lossy().into_owned();
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }
}

#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub page: Page,
    pub access: Access,
}

#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub entry: &'a RouteEntry,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<(String, Page, Access)>,
}

impl RouteTableBuilder {
    pub fn route(mut self, pattern: &str, page: Page, access: Access) -> Self {
        self.routes.push((pattern.to_string(), page, access));
        self
    }

    pub fn public(self, pattern: &str, page: Page) -> Self {
        self.route(pattern, page, Access::Public)
    }

    pub fn guest(self, pattern: &str, page: Page, role: Role) -> Self {
        self.route(pattern, page, Access::Guest(role))
    }

    pub fn protected(self, pattern: &str, page: Page, role: Role) -> Self {
        self.route(pattern, page, Access::Protected(role))
    }

    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(self.routes.len());
        for (raw, page, access) in self.routes {
            let pattern = PathPattern::parse(&raw)?;
            if entries.iter().any(|e| e.pattern.shape() == pattern.shape()) {
                return Err(RouteTableError::Duplicate(pattern.raw));
            }
            entries.push(RouteEntry {
                pattern,
                page,
                access,
            });
        }
        Ok(RouteTable { entries })
    }
}

/// Ordered, immutable list of route entries, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        let path = path.split(|c| c == '?' || c == '#').next().unwrap_or_default();
        let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

        let mut best: Option<(&RouteEntry, HashMap<String, String>)> = None;
        let mut fallback: Option<&RouteEntry> = None;

        for entry in &self.entries {
            if entry.pattern.is_wildcard() {
                fallback = fallback.or(Some(entry));
                continue;
            }
            let Some(params) = entry.pattern.matches(&parts) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((current, _)) => {
                    entry.pattern.specificity() > current.pattern.specificity()
                }
            };
            if better {
                best = Some((entry, params));
            }
        }

        match best {
            Some((entry, params)) => Some(Resolved { entry, params }),
            None => fallback.map(|entry| Resolved {
                entry,
                params: HashMap::new(),
            }),
        }
    }

    /// Every page of the platform, for the user, provider and admin spaces.
    pub fn rentify() -> Result<RouteTable, RouteTableError> {
        use Page::*;
        use Role::{Admin, Provider, User};

        RouteTable::builder()
            .public("/*", NotFound)
            .public("/", Landing)
            .public("/home", Landing)
            // admin
            .guest("/admin", AdminLogin, Admin)
            .protected("/admin/dashboard", AdminDashboard, Admin)
            .protected("/admin/users", AdminUsers, Admin)
            .protected("/admin/providers", AdminProviders, Admin)
            .protected("/admin/bookings", AdminBookings, Admin)
            .guest("/admin/forgotpassword", AdminForgotPassword, Admin)
            .guest("/admin/verifyotp", AdminVerifyOtp, Admin)
            .public("/admin/changepassword", AdminChangePassword)
            .protected("/admin/messages", AdminMessages, Admin)
            .protected("/admin/profile", AdminProfile, Admin)
            .protected("/admin/sales", AdminSales, Admin)
            .protected("/singlebookingdetails", AdminBookingDetails, Admin)
            // provider
            .guest("/provider", ProviderLogin, Provider)
            .guest("/provider/signup", ProviderSignup, Provider)
            .protected("/provider/dashboard", ProviderDashboard, Provider)
            .protected("/provider/bookings", ProviderBookings, Provider)
            .protected("/provider/rooms", ProviderRooms, Provider)
            .protected("/provider/rooms/addrooms", ProviderAddRoom, Provider)
            .protected("/provider/rooms/editrooms/:roomId", ProviderEditRoom, Provider)
            .guest("/provider/forgotpassword", ProviderForgotPassword, Provider)
            .guest("/provider/verifyOtp", ProviderVerifyOtp, Provider)
            .guest("/provider/otplogin", ProviderOtpLogin, Provider)
            .protected("/provider/profileedit", ProviderProfile, Provider)
            .guest("/provider/register", ProviderRegister, Provider)
            .protected("/provider/account", ProviderAccount, Provider)
            .protected("/provider/singlebookingdetails", ProviderBookingDetails, Provider)
            // user
            .guest("/login", UserLogin, User)
            .guest("/signup", UserSignup, User)
            .guest("/forgotpassword", UserForgotPassword, User)
            .guest("/verifyotp", UserVerifyOtp, User)
            .guest("/register", UserRegister, User)
            .public("/searchedroom", SearchedRooms)
            .public("/searchedroom/roompreview/:id", RoomPreview)
            .protected("/userprofile", UserProfile, User)
            .protected("/editprofile", UserProfile, User)
            .protected("/dashboard", UserDashboard, User)
            .protected("/change_password", UserChangePassword, User)
            .protected("/notification", UserNotifications, User)
            .protected("/bookings", UserBookings, User)
            .protected("/edit_profile", UserEditProfile, User)
            .protected("/room", UserRooms, User)
            .protected("/rentify", UserRentify, User)
            .public("/contact", Contact)
            .protected("/addroom", UserAddRoom, User)
            .protected("/usereditroom/:roomId", UserEditRoom, User)
            .protected("/addedroompreview/:id", UserAddedRoom, User)
            .protected("wallet", UserWallet, User)
            .protected("/cart", UserCart, User)
            .public("/successpage", PaymentSuccess)
            .public("/failurepage", PaymentFailure)
            .build()
    }
}
