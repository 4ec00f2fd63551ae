//! Test fixtures and constants.

/// Stand-in for `/usr/bin/security`.
///
/// Items live as files under `$STORE/<family>/<account>@<name>` holding the
/// password, with `.path` / `.ptcl` siblings for internet attributes. Every
/// invocation is appended to `$STORE/calls.log`. If `$STORE/exit-code`
/// exists the script exits with that code without doing anything else.
pub const FAKE_SECURITY: &str = r#"#!/bin/sh
STORE="__STORE__"
echo "$*" >> "$STORE/calls.log"
if [ -f "$STORE/exit-code" ]; then
    exit "$(cat "$STORE/exit-code")"
fi

sub="$1"
shift
account=""; name=""; secret=""; force=0; path=""; proto=""
while [ $# -gt 0 ]; do
    case "$1" in
        -a) account="$2"; shift 2 ;;
        -s) name="$2"; shift 2 ;;
        -w) secret="$2"; shift 2 ;;
        -p) path="$2"; shift 2 ;;
        -r) proto="$2"; shift 2 ;;
        -U) force=1; shift ;;
        *) shift ;;
    esac
done

case "$sub" in
    *-generic-password) family=generic; attr=svce ;;
    *-internet-password) family=internet; attr=srvr ;;
    *) echo "security: unknown command $sub" >&2; exit 2 ;;
esac

mkdir -p "$STORE/$family"
item="$STORE/$family/$account@$name"
missing="security: SecKeychainSearchCopyNext: The specified item could not be found in the keychain."

case "$sub" in
    find-*)
        if [ ! -f "$item" ]; then echo "$missing" >&2; exit 44; fi
        echo "keychain: \"$STORE/login.keychain-db\""
        echo "class: \"$family\""
        echo "attributes:"
        echo "    \"acct\"<blob>=\"$account\""
        echo "    \"desc\"<blob>=<NULL>"
        if [ -f "$item.path" ]; then echo "    \"path\"<blob>=\"$(cat "$item.path")\""; fi
        if [ -f "$item.ptcl" ]; then echo "    \"ptcl\"<uint32>=\"$(cat "$item.ptcl")\""; fi
        echo "    \"$attr\"<blob>=\"$name\""
        printf 'password: "%s"\n' "$(cat "$item")" >&2
        ;;
    add-*)
        if [ -f "$item" ] && [ "$force" -eq 0 ]; then
            echo "security: SecKeychainItemCreateFromContent: The specified item already exists in the keychain." >&2
            exit 45
        fi
        printf '%s' "$secret" > "$item"
        if [ -n "$path" ]; then printf '%s' "$path" > "$item.path"; fi
        if [ -n "$proto" ]; then printf '%s' "$proto" > "$item.ptcl"; fi
        ;;
    delete-*)
        if [ ! -f "$item" ]; then echo "$missing" >&2; exit 44; fi
        rm -f "$item" "$item.path" "$item.ptcl"
        echo "password has been deleted."
        ;;
esac
exit 0
"#;

/// Answer to the create/override confirmation followed by the secret.
pub fn yes_then(secret: &str) -> String {
    format!("y\n{}\n", secret)
}
